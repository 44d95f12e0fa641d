//! Metric record model - one observation per test invocation.

use crate::Time;
use serde::{Deserialize, Serialize};

/// One timestamped snapshot of measured performance values from a single
/// test invocation. Immutable after creation; the history is append-only.
///
/// Every numeric field defaults to zero and is filled in only when the
/// extraction engine finds a matching pattern in the test output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// When the metrics were extracted (monitor wall-clock, not the runner's)
    pub timestamp: Time,

    /// Operations per second
    pub throughput: f64,

    /// Average latency in milliseconds
    pub latency_avg: f64,

    /// 95th percentile latency in milliseconds.
    ///
    /// The test-runner output carries no marker for this value, so it is
    /// always 0.0. Kept in the model and the report for forward
    /// compatibility with runners that do emit it.
    pub latency_p95: f64,

    /// Memory usage in megabytes
    pub memory_usage: f64,

    /// Cache hit ratio as a percentage in [0, 100]
    pub cache_hit_ratio: f64,

    /// Success rate as a percentage in [0, 100]
    pub success_rate: f64,

    /// Number of passing tests. `tests_passed <= tests_total` is
    /// best-effort only; the source text may violate it.
    pub tests_passed: u64,

    /// Total number of tests
    pub tests_total: u64,
}

impl MetricRecord {
    /// Create a record stamped with the current time and all values zeroed.
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            throughput: 0.0,
            latency_avg: 0.0,
            latency_p95: 0.0,
            memory_usage: 0.0,
            cache_hit_ratio: 0.0,
            success_rate: 0.0,
            tests_passed: 0,
            tests_total: 0,
        }
    }
}

impl Default for MetricRecord {
    fn default() -> Self {
        Self::new()
    }
}
