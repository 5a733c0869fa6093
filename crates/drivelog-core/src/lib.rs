//! Drivelog Core - Shared functionality for the drivelog tools
//!
//! Everything the metrics engine and the command line share: where files
//! live, what the cost configuration looks like, and how numbers are printed.

pub mod config;
pub mod format;
pub mod fuel;
pub mod paths;

pub use config::{ConfigError, ConfigStore, CostConfiguration, JsonConfigStore};
pub use fuel::FuelType;
pub use paths::Paths;
