//! Validation of what the driver types in
//!
//! The engine accepts any number. This is where nonsense (negative distance,
//! a 30 hour day) gets turned away, before it is stored.

use chrono::{Local, NaiveDate};
use drivelog_core::format::parse_decimal;
use thiserror::Error;

/// Most hours a single calendar day can hold
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Input validation errors
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("hours worked cannot exceed 24 in one day, got {0}")]
    TooManyHours(f64),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),
}

/// Cumulative totals for one day, already checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotals {
    pub distance_km: f64,
    pub gross_revenue: f64,
    pub hours_worked: f64,
}

impl DailyTotals {
    pub fn new(distance_km: f64, gross_revenue: f64, hours_worked: f64) -> Result<Self, InputError> {
        check("distance", distance_km)?;
        check("revenue", gross_revenue)?;
        check("hours", hours_worked)?;
        if hours_worked > MAX_HOURS_PER_DAY {
            return Err(InputError::TooManyHours(hours_worked));
        }
        Ok(Self {
            distance_km,
            gross_revenue,
            hours_worked,
        })
    }
}

fn check(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        Err(InputError::NotFinite { field, value })
    } else if value < 0.0 {
        Err(InputError::Negative { field, value })
    } else {
        Ok(())
    }
}

/// Parse `YYYY-MM-DD`, today when absent
pub fn parse_date(s: Option<&str>) -> Result<NaiveDate, InputError> {
    match s {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| InputError::Date(s.to_string())),
    }
}

/// clap value parser for amounts, accepting `275,50` as well as `275.50`
pub fn parse_amount(s: &str) -> Result<f64, String> {
    parse_decimal(s).ok_or_else(|| format!("'{s}' is not a number (e.g. 275.50 or 8.0)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_totals() {
        let totals = DailyTotals::new(120.0, 275.5, 8.0).unwrap();
        assert_eq!(totals.hours_worked, 8.0);
        assert!(DailyTotals::new(0.0, 0.0, 0.0).is_ok());
        assert!(DailyTotals::new(0.0, 0.0, 24.0).is_ok());
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            DailyTotals::new(-1.0, 10.0, 1.0),
            Err(InputError::Negative { field: "distance", value: -1.0 })
        );
        assert!(matches!(
            DailyTotals::new(1.0, -10.0, 1.0),
            Err(InputError::Negative { field: "revenue", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_and_long_days() {
        assert!(matches!(
            DailyTotals::new(f64::NAN, 10.0, 1.0),
            Err(InputError::NotFinite { field: "distance", .. })
        ));
        assert_eq!(DailyTotals::new(1.0, 1.0, 24.5), Err(InputError::TooManyHours(24.5)));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-03-15")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(parse_date(Some("15/03/2024")), Err(InputError::Date("15/03/2024".into())));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("275,50"), Ok(275.5));
        assert!(parse_amount("abc").is_err());
    }
}
