//! Trend model - derived comparison of recent vs. older averages.

use crate::MetricRecord;
use serde::{Deserialize, Serialize};

/// Metrics eligible for trend analysis.
///
/// `latency_p95` is deliberately absent: extraction never populates it,
/// so a trend over it would always compare zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Operations per second
    Throughput,
    /// Average latency in milliseconds
    LatencyAvg,
    /// Memory usage in megabytes
    MemoryUsage,
    /// Cache hit ratio percentage
    CacheHitRatio,
    /// Success rate percentage
    SuccessRate,
}

impl Metric {
    /// The fixed set of metrics analyzed for trends, in report order.
    pub const ALL: [Metric; 5] = [
        Metric::Throughput,
        Metric::LatencyAvg,
        Metric::MemoryUsage,
        Metric::CacheHitRatio,
        Metric::SuccessRate,
    ];

    /// Read this metric's value out of a record.
    pub fn value_of(&self, record: &MetricRecord) -> f64 {
        match self {
            Metric::Throughput => record.throughput,
            Metric::LatencyAvg => record.latency_avg,
            Metric::MemoryUsage => record.memory_usage,
            Metric::CacheHitRatio => record.cache_hit_ratio,
            Metric::SuccessRate => record.success_rate,
        }
    }

    /// Human-readable name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput",
            Metric::LatencyAvg => "Avg Latency",
            Metric::MemoryUsage => "Memory Usage",
            Metric::CacheHitRatio => "Cache Hit Ratio",
            Metric::SuccessRate => "Success Rate",
        }
    }
}

/// Qualitative direction of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Recent average more than 5% above the older average
    Up,
    /// Recent average more than 5% below the older average
    Down,
    /// Change within the ±5% noise band
    Flat,
    /// Older average was zero; percentage change is undefined
    NotApplicable,
}

/// Derived comparison of recent vs. older averages for one metric.
///
/// Never persisted; recomputed from the history on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Which metric was analyzed
    pub metric: Metric,

    /// Percentage change of the recent average relative to the older
    /// average. Zero when the older average is zero.
    pub change_pct: f64,

    /// Direction classification of the change
    pub direction: TrendDirection,
}
