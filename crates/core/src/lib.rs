//! perfwatch core data models.
//!
//! This crate defines the records collected by the performance monitor
//! and the derived trend types computed over them.

#![warn(missing_docs)]

mod record;
mod trend;

pub use record::MetricRecord;
pub use trend::{Metric, TrendDirection, TrendResult};

/// Timestamp type used throughout the system.
pub type Time = chrono::DateTime<chrono::Utc>;
