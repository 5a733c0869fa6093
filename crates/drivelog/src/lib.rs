//! drivelog - Driver's daily log
//!
//! Revenue is not income. A day with R$ 300 on the app can still lose money
//! once fuel and the weekly car rental are paid for.
//!
//! Drivers log each day's cumulative totals (km, revenue, hours). Metrics are
//! never stored: they are recomputed from the raw totals and the current cost
//! settings every time they are shown.
//!
//! Commands:
//! - register / login / logout / whoami: who is driving
//! - log: Save a day's totals (replacing earlier totals for that day)
//! - show: One day's performance
//! - report: Every day plus overall totals and averages
//! - config: Fuel and fixed cost settings
//! - export: Raw data export for external tools

pub mod db;
pub mod display;
pub mod engine;
pub mod input;
pub mod report;
pub mod session;
pub mod settings;
pub mod users;

pub use db::{DailyLogEntry, LogDatabase, LogStore, StoreError, UserId};
pub use engine::{aggregate, compute_daily_metrics, AggregateMetrics, DerivedMetrics};
pub use report::Report;
pub use session::Session;
pub use settings::{ConfigView, CostSettings};
