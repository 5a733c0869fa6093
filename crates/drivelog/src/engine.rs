//! Metrics engine
//!
//! Pure functions from raw daily totals plus a cost configuration snapshot to
//! derived financial metrics. Nothing here is stored; every number is
//! recomputed on demand, so changing the configuration changes the metrics
//! of old days too.
//!
//! The engine never fails. Zero distance, zero hours, and zero consumption
//! all degrade to zero contributions.

use crate::db::DailyLogEntry;
use drivelog_core::CostConfiguration;
use serde::{Deserialize, Serialize};

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Metrics derived from one day's totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub revenue_per_km: f64,
    pub revenue_per_hour: f64,
    pub estimated_fuel_cost: f64,
    /// Not rounded
    pub liters_consumed: f64,
    pub net_profit: f64,
}

/// Totals and averages over a set of days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub day_count: usize,
    pub total_km: f64,
    pub total_revenue: f64,
    pub total_hours: f64,
    pub avg_km_per_day: f64,
    /// Total revenue over total distance, not the mean of daily rates
    pub avg_revenue_per_km: f64,
    /// Total revenue over total hours, not the mean of daily rates
    pub avg_revenue_per_hour: f64,
    pub total_estimated_fuel_cost: f64,
    pub total_fixed_cost: f64,
    pub total_net_profit: f64,
}

/// Compute revenue rates, fuel estimate, and net profit for one day.
///
/// `fixed_daily_cost` is subtracted exactly once, whatever span of time the
/// inputs actually cover.
pub fn compute_daily_metrics(
    distance_km: f64,
    gross_revenue: f64,
    hours_worked: f64,
    config: &CostConfiguration,
) -> DerivedMetrics {
    let mut metrics = DerivedMetrics::default();

    if distance_km > 0.0 {
        metrics.revenue_per_km = round2(gross_revenue / distance_km);
    }
    if hours_worked > 0.0 {
        metrics.revenue_per_hour = round2(gross_revenue / hours_worked);
    }

    // Electric vehicles never burn fuel, whatever consumption and price say.
    if !config.fuel_type.is_electric()
        && distance_km > 0.0
        && config.fuel_consumption_km_per_liter > 0.0
    {
        metrics.liters_consumed = distance_km / config.fuel_consumption_km_per_liter;
        metrics.estimated_fuel_cost =
            round2(metrics.liters_consumed * config.fuel_price_per_liter);
    }

    metrics.net_profit =
        round2(gross_revenue - metrics.estimated_fuel_cost - config.fixed_daily_cost);

    metrics
}

/// Fold a set of days into totals and overall averages.
///
/// Returns `None` for an empty set. Overall rates and fuel cost come from
/// running the daily computation on the summed totals; the fixed cost is
/// charged once per day here instead, since the daily computation would only
/// charge it once overall.
pub fn aggregate<'a, I>(entries: I, config: &CostConfiguration) -> Option<AggregateMetrics>
where
    I: IntoIterator<Item = &'a DailyLogEntry>,
{
    let mut day_count = 0usize;
    let mut total_km = 0.0;
    let mut total_revenue = 0.0;
    let mut total_hours = 0.0;

    for entry in entries {
        day_count += 1;
        total_km += entry.distance_km;
        total_revenue += entry.gross_revenue;
        total_hours += entry.hours_worked;
    }

    if day_count == 0 {
        return None;
    }

    let overall = compute_daily_metrics(total_km, total_revenue, total_hours, config);
    let total_revenue_rounded = round2(total_revenue);
    let total_fixed_cost = round2(day_count as f64 * config.fixed_daily_cost);

    Some(AggregateMetrics {
        day_count,
        total_km: round2(total_km),
        total_revenue: total_revenue_rounded,
        total_hours: round2(total_hours),
        avg_km_per_day: round2(total_km / day_count as f64),
        avg_revenue_per_km: overall.revenue_per_km,
        avg_revenue_per_hour: overall.revenue_per_hour,
        total_estimated_fuel_cost: overall.estimated_fuel_cost,
        total_fixed_cost,
        total_net_profit: round2(
            total_revenue_rounded - overall.estimated_fuel_cost - total_fixed_cost,
        ),
    })
}
