//! Cost settings as the driver enters them
//!
//! Drivers think of rent in weeks; the engine works in days. Converting
//! between the two, and zeroing fuel numbers for electric cars, happens here
//! before anything reaches the config store.

use crate::engine::round2;
use drivelog_core::{CostConfiguration, FuelType};
use serde::{Deserialize, Serialize};

/// Settings form: what the driver types. `None` keeps the saved value.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSettings {
    pub fuel_type: FuelType,
    pub fuel_consumption_km_per_liter: Option<f64>,
    pub fuel_price_per_liter: Option<f64>,
    /// Lease, fees, etc. per week. Zero for an owned car.
    pub weekly_fixed_cost: Option<f64>,
}

impl CostSettings {
    /// Configuration to store, filling unset fields from `current`
    pub fn apply_to(self, current: &CostConfiguration) -> CostConfiguration {
        // Unset weekly keeps the stored daily cost verbatim, not daily * 7 / 7.
        let fixed_daily_cost = match self.weekly_fixed_cost {
            Some(weekly) if weekly > 0.0 => round2(weekly / 7.0),
            Some(_) => 0.0,
            None => current.fixed_daily_cost,
        };

        let (consumption, price) = if self.fuel_type.is_electric() {
            (0.0, 0.0)
        } else {
            (
                self.fuel_consumption_km_per_liter
                    .unwrap_or(current.fuel_consumption_km_per_liter),
                self.fuel_price_per_liter
                    .unwrap_or(current.fuel_price_per_liter),
            )
        };

        CostConfiguration {
            fuel_consumption_km_per_liter: consumption,
            fuel_price_per_liter: price,
            fuel_type: self.fuel_type,
            fixed_daily_cost,
        }
    }
}

/// Configuration as shown back to the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigView {
    pub fuel_consumption_km_per_liter: f64,
    pub fuel_price_per_liter: f64,
    pub fuel_type: FuelType,
    pub weekly_fixed_cost: f64,
    pub daily_fixed_cost: f64,
}

impl From<&CostConfiguration> for ConfigView {
    fn from(config: &CostConfiguration) -> Self {
        Self {
            fuel_consumption_km_per_liter: config.fuel_consumption_km_per_liter,
            fuel_price_per_liter: config.fuel_price_per_liter,
            fuel_type: config.fuel_type.clone(),
            weekly_fixed_cost: round2(config.fixed_daily_cost * 7.0),
            daily_fixed_cost: config.fixed_daily_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(fuel_type: FuelType, weekly: Option<f64>) -> CostSettings {
        CostSettings {
            fuel_type,
            fuel_consumption_km_per_liter: Some(10.0),
            fuel_price_per_liter: Some(5.89),
            weekly_fixed_cost: weekly,
        }
    }

    fn saved() -> CostConfiguration {
        CostConfiguration {
            fuel_consumption_km_per_liter: 12.0,
            fuel_price_per_liter: 5.0,
            fuel_type: FuelType::Gasoline,
            fixed_daily_cost: 57.14,
        }
    }

    #[test]
    fn test_weekly_to_daily() {
        let config =
            settings(FuelType::Gasoline, Some(400.0)).apply_to(&CostConfiguration::default());

        assert_eq!(config.fixed_daily_cost, 57.14);
        assert_eq!(config.fuel_consumption_km_per_liter, 10.0);
        assert_eq!(config.fuel_price_per_liter, 5.89);
    }

    #[test]
    fn test_owned_car_has_no_fixed_cost() {
        let config = settings(FuelType::Ethanol, Some(0.0)).apply_to(&saved());
        assert_eq!(config.fixed_daily_cost, 0.0);
    }

    #[test]
    fn test_unset_fields_keep_saved_values() {
        let config = CostSettings {
            fuel_type: FuelType::Gasoline,
            fuel_consumption_km_per_liter: None,
            fuel_price_per_liter: Some(6.0),
            weekly_fixed_cost: None,
        }
        .apply_to(&saved());

        assert_eq!(config.fuel_consumption_km_per_liter, 12.0);
        assert_eq!(config.fuel_price_per_liter, 6.0);
        // Not 399.98 / 7 re-rounded
        assert_eq!(config.fixed_daily_cost, 57.14);
    }

    #[test]
    fn test_electric_zeroes_fuel() {
        let config = settings(FuelType::parse("Elétrico"), Some(700.0)).apply_to(&saved());

        assert_eq!(config.fuel_consumption_km_per_liter, 0.0);
        assert_eq!(config.fuel_price_per_liter, 0.0);
        assert_eq!(config.fixed_daily_cost, 100.0);
    }

    #[test]
    fn test_electric_ignores_saved_fuel_numbers() {
        let config = CostSettings {
            fuel_type: FuelType::Electric,
            fuel_consumption_km_per_liter: None,
            fuel_price_per_liter: None,
            weekly_fixed_cost: None,
        }
        .apply_to(&saved());

        assert_eq!(config.fuel_consumption_km_per_liter, 0.0);
        assert_eq!(config.fuel_price_per_liter, 0.0);
        assert_eq!(config.fixed_daily_cost, 57.14);
    }

    #[test]
    fn test_view_shows_weekly() {
        let config = CostConfiguration {
            fixed_daily_cost: 57.14,
            ..Default::default()
        };
        let view = ConfigView::from(&config);
        assert_eq!(view.weekly_fixed_cost, 399.98);
        assert_eq!(view.daily_fixed_cost, 57.14);
    }
}
