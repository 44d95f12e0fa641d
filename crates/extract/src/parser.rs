//! Per-field extraction rules over raw test-runner output.

use perfwatch_core::MetricRecord;

/// Extract a [`MetricRecord`] from the full stdout of one test invocation.
///
/// Every line is scanned independently; line order carries no meaning.
/// Fields with no matching (or only malformed) markers keep their zero
/// default - extraction never fails. Resolution when several lines match
/// the same field:
///
/// - `throughput` and `memory_usage` keep the maximum value seen
/// - `latency_avg`, `cache_hit_ratio`, `success_rate`, `tests_passed` and
///   `tests_total` are overwritten, so the last match wins
///
/// `latency_p95` has no marker in the runner output and always stays 0.0.
pub fn extract_metrics(output: &str) -> MetricRecord {
    let mut record = MetricRecord::new();

    for raw in output.lines() {
        let line = raw.trim();

        if line.contains("ops/sec") {
            if let Some(value) = throughput_on_line(line) {
                record.throughput = record.throughput.max(value);
            }
        }

        if line.contains("avg=") && line.contains("ms") {
            if let Some(value) = latency_avg_on_line(line) {
                record.latency_avg = value;
            }
        }

        if line.contains("Memory:") && line.contains("MB") {
            if let Some(value) = memory_on_line(line) {
                record.memory_usage = record.memory_usage.max(value);
            }
        }

        if line.contains("Cache:") && line.contains('%') {
            if let Some(value) = cache_hit_ratio_on_line(line) {
                record.cache_hit_ratio = value;
            }
        }

        if line.to_lowercase().contains("success") && line.contains('%') {
            if let Some(value) = success_rate_on_line(line) {
                record.success_rate = value;
            }
        }

        if line.contains("Passing Tests:") {
            if let Some(count) = count_after_colon(line) {
                record.tests_passed = count;
            }
        }

        if line.contains("Total Tests:") {
            if let Some(count) = count_after_colon(line) {
                record.tests_total = count;
            }
        }
    }

    record
}

/// Largest value preceding an `ops/sec` token on this line.
///
/// A malformed candidate abandons the rest of the line, leaving any value
/// already found.
fn throughput_on_line(line: &str) -> Option<f64> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let mut best: Option<f64> = None;

    for (i, part) in parts.iter().enumerate() {
        if part.contains("ops/sec") && i > 0 {
            match parts[i - 1].trim().parse::<f64>() {
                Ok(value) => {
                    best = Some(best.map_or(value, |b: f64| b.max(value)));
                }
                Err(_) => break,
            }
        }
    }

    best
}

/// Value between `avg=` and the next comma, with an `ms` suffix stripped.
fn latency_avg_on_line(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once("avg=")?;
    let avg_part = rest.split(',').next().unwrap_or("");
    if !avg_part.contains("ms") {
        return None;
    }
    avg_part.replace("ms", "").trim().parse().ok()
}

/// First whitespace token containing `MB`, with the suffix stripped.
fn memory_on_line(line: &str) -> Option<f64> {
    let token = line.split_whitespace().find(|part| part.contains("MB"))?;
    token.replace("MB", "").trim().parse().ok()
}

/// Value between `hit_ratio=` and the next `%`.
fn cache_hit_ratio_on_line(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once("hit_ratio=")?;
    rest.split('%').next().unwrap_or("").trim().parse().ok()
}

/// First whitespace token containing `%`, with the suffix stripped.
///
/// Any `%` token on a line mentioning "success" qualifies, even when it is
/// an unrelated percentage - the matching order is a preserved quirk of the
/// output contract, not an oversight.
fn success_rate_on_line(line: &str) -> Option<f64> {
    let token = line.split_whitespace().find(|part| part.contains('%'))?;
    token.replace('%', "").trim().parse().ok()
}

/// Integer after the first colon on the line.
fn count_after_colon(line: &str) -> Option<u64> {
    line.split(':').nth(1)?.trim().parse().ok()
}
