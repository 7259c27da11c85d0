//! # Drone Analytics
//!
//! Pure aggregations over a loaded drone roster.
//!
//! ## Features
//!
//! - Fleet status counters (ready, needs repair, missing camera)
//! - Battery and airframe type distributions
//! - Distinct-value catalogs for filter choices
//! - JSON and Markdown fleet reports

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod engine;
pub mod error;
pub mod queries;
pub mod reports;

pub use engine::FleetAnalytics;
pub use error::{AnalyticsError, Result};
pub use queries::{
    battery_distribution, categorical_distribution, column_catalog, status_counters,
    type_distribution, unique_values, ColumnChoices, DistributionEntry, StatusCounters,
};
pub use reports::FleetReport;
