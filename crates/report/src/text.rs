//! Textual reports.

use perfwatch_core::{MetricRecord, TrendDirection, TrendResult};

const BANNER: &str = "==================================================";
const RULE: &str = "------------------------------";

/// Format one record as a banner-framed block.
pub fn format_record(record: &MetricRecord) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!(
        "Performance Metrics - {}\n",
        record.timestamp.to_rfc3339()
    ));
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!("{:<19}{:.1} ops/sec\n", "Throughput:", record.throughput));
    out.push_str(&format!("{:<19}{:.1} ms\n", "Avg Latency:", record.latency_avg));
    out.push_str(&format!("{:<19}{:.1} ms\n", "P95 Latency:", record.latency_p95));
    out.push_str(&format!("{:<19}{:.1} MB\n", "Memory Usage:", record.memory_usage));
    out.push_str(&format!("{:<19}{:.1}%\n", "Cache Hit Ratio:", record.cache_hit_ratio));
    out.push_str(&format!("{:<19}{:.1}%\n", "Success Rate:", record.success_rate));
    out.push_str(&format!(
        "{:<19}{}/{}\n",
        "Tests Passed:", record.tests_passed, record.tests_total
    ));
    out.push_str(BANNER);
    out
}

/// Format trend results as a per-metric table with direction arrows.
pub fn format_trends(results: &[TrendResult]) -> String {
    let mut out = String::new();
    out.push_str("\nTrend Analysis\n");
    out.push_str(RULE);
    out.push('\n');

    for result in results {
        out.push_str(&format!(
            "{:<15} {} {:+6.1}%\n",
            result.metric.label(),
            arrow(result.direction),
            result.change_pct
        ));
    }

    out
}

fn arrow(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "↑",
        TrendDirection::Down => "↓",
        TrendDirection::Flat => "→",
        TrendDirection::NotApplicable => "N/A",
    }
}
