//! Full history report
//!
//! Per-day rows are recomputed with the current configuration, then the
//! whole history is folded into totals.

use crate::db::DailyLogEntry;
use crate::engine::{aggregate, compute_daily_metrics, AggregateMetrics};
use chrono::NaiveDate;
use drivelog_core::CostConfiguration;
use serde::{Deserialize, Serialize};

/// One line of the daily table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub distance_km: f64,
    pub gross_revenue: f64,
    pub estimated_fuel_cost: f64,
    pub net_profit: f64,
    pub hours_worked: f64,
}

/// Daily rows plus overall totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Same order as the entries, newest first when read from the store
    pub daily: Vec<ReportRow>,
    /// `None` when there is no history yet
    pub overall: Option<AggregateMetrics>,
}

impl Report {
    pub fn build(entries: &[DailyLogEntry], config: &CostConfiguration) -> Self {
        let daily = entries
            .iter()
            .map(|entry| {
                let metrics = compute_daily_metrics(
                    entry.distance_km,
                    entry.gross_revenue,
                    entry.hours_worked,
                    config,
                );
                ReportRow {
                    date: entry.date,
                    distance_km: entry.distance_km,
                    gross_revenue: entry.gross_revenue,
                    estimated_fuel_cost: metrics.estimated_fuel_cost,
                    net_profit: metrics.net_profit,
                    hours_worked: entry.hours_worked,
                }
            })
            .collect();

        Self {
            daily,
            overall: aggregate(entries, config),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

/// Raw entries as CSV, header included
pub fn entries_to_csv(entries: &[DailyLogEntry]) -> String {
    let mut out = String::from("date,distance_km,gross_revenue,hours_worked\n");
    for entry in entries {
        out.push_str(&format!(
            "{},{},{},{}\n",
            entry.date, entry.distance_km, entry.gross_revenue, entry.hours_worked
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UserId;
    use drivelog_core::FuelType;

    fn entry(day: u32, distance_km: f64, gross_revenue: f64, hours_worked: f64) -> DailyLogEntry {
        DailyLogEntry {
            user_id: UserId::from(1),
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            distance_km,
            gross_revenue,
            hours_worked,
        }
    }

    fn config() -> CostConfiguration {
        CostConfiguration {
            fuel_consumption_km_per_liter: 10.0,
            fuel_price_per_liter: 5.0,
            fuel_type: FuelType::Gasoline,
            fixed_daily_cost: 20.0,
        }
    }

    #[test]
    fn test_build() {
        let entries = vec![entry(2, 50.0, 150.0, 3.0), entry(1, 100.0, 200.0, 5.0)];
        let report = Report::build(&entries, &config());

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, entries[0].date);
        assert_eq!(report.daily[0].estimated_fuel_cost, 25.0);
        assert_eq!(report.daily[0].net_profit, 105.0);
        assert_eq!(report.daily[1].net_profit, 130.0);

        let overall = report.overall.unwrap();
        assert_eq!(overall.total_net_profit, 235.0);
    }

    #[test]
    fn test_empty() {
        let report = Report::build(&[], &config());
        assert!(report.is_empty());
        assert!(report.overall.is_none());
    }

    #[test]
    fn test_csv() {
        let csv = entries_to_csv(&[entry(3, 120.5, 275.5, 8.0)]);
        assert_eq!(csv, "date,distance_km,gross_revenue,hours_worked\n2025-02-03,120.5,275.5,8\n");
    }
}
