//! Cost configuration and its JSON store
//!
//! The file keeps the two sections drivers think in terms of:
//!
//! ```json
//! {
//!   "vehicle": { "consumption_km_per_liter": 10.0, "fuel_type": "Gasoline" },
//!   "costs": { "fuel_price_per_liter": 5.89, "fixed_daily_cost": 57.14 }
//! }
//! ```
//!
//! Reading never fails. A missing or broken file degrades to zero costs so
//! the metrics still come out, just without deductions.

use crate::fuel::FuelType;
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Snapshot of everything the engine needs to turn revenue into profit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostConfiguration {
    /// Average consumption (km/L)
    pub fuel_consumption_km_per_liter: f64,
    /// Fuel price per liter
    pub fuel_price_per_liter: f64,
    pub fuel_type: FuelType,
    /// Periodic fixed cost (lease, fees) normalized to one day
    pub fixed_daily_cost: f64,
}

/// Configuration store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the cost configuration lives
pub trait ConfigStore {
    /// Current configuration, zero defaults when unavailable
    fn read(&self) -> CostConfiguration;

    fn write(&self, config: &CostConfiguration) -> Result<(), ConfigError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    vehicle: VehicleSection,
    #[serde(default)]
    costs: CostsSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct VehicleSection {
    #[serde(default)]
    consumption_km_per_liter: f64,
    #[serde(default)]
    fuel_type: FuelType,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CostsSection {
    #[serde(default)]
    fuel_price_per_liter: f64,
    #[serde(default)]
    fixed_daily_cost: f64,
}

impl From<ConfigFile> for CostConfiguration {
    fn from(file: ConfigFile) -> Self {
        Self {
            fuel_consumption_km_per_liter: file.vehicle.consumption_km_per_liter,
            fuel_price_per_liter: file.costs.fuel_price_per_liter,
            fuel_type: file.vehicle.fuel_type,
            fixed_daily_cost: file.costs.fixed_daily_cost,
        }
    }
}

impl From<&CostConfiguration> for ConfigFile {
    fn from(config: &CostConfiguration) -> Self {
        Self {
            vehicle: VehicleSection {
                consumption_km_per_liter: config.fuel_consumption_km_per_liter,
                fuel_type: config.fuel_type.clone(),
            },
            costs: CostsSection {
                fuel_price_per_liter: config.fuel_price_per_liter,
                fixed_daily_cost: config.fixed_daily_cost,
            },
        }
    }
}

/// JSON file backed configuration store
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard config location
    pub fn from_paths(paths: &Paths) -> Self {
        Self::new(paths.config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, `None` when it does not exist yet
    pub fn try_read(&self) -> Result<Option<CostConfiguration>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| ConfigError::Format {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(file.into()))
    }
}

impl ConfigStore for JsonConfigStore {
    fn read(&self) -> CostConfiguration {
        match self.try_read() {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %self.path.display(), "no config file, using zero costs");
                CostConfiguration::default()
            }
            Err(e) => {
                warn!(error = %e, "unreadable config, using zero costs");
                CostConfiguration::default()
            }
        }
    }

    fn write(&self, config: &CostConfiguration) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(&ConfigFile::from(config)).map_err(|source| {
            ConfigError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_error)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
