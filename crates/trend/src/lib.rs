//! Trend analysis over the metric history.
//!
//! Compares the mean of a recent window of records against the mean of the
//! window preceding it and classifies the change per metric. Analysis is a
//! pure read; the history is never mutated.

#![warn(missing_docs)]

use perfwatch_core::{Metric, MetricRecord, TrendDirection, TrendResult};

/// How many records make up the "recent" comparison window.
const WINDOW: usize = 5;

/// Percentage band inside which a change counts as noise, not a trend.
const FLAT_BAND_PCT: f64 = 5.0;

/// Compute trend results for the fixed metric set.
///
/// `recent` is the last [`WINDOW`] records (or fewer), `older` the window
/// preceding it: records at `[-10..-5]` when the history holds at least ten,
/// otherwise everything before `recent`. Returns `None` when there is not
/// enough historical data to form both windows - fewer than two records, or
/// nothing left once `recent` is taken.
pub fn analyze(history: &[MetricRecord]) -> Option<Vec<TrendResult>> {
    if history.len() < 2 {
        return None;
    }

    let split = history.len().saturating_sub(WINDOW);
    let recent = &history[split..];
    let older = if history.len() >= 2 * WINDOW {
        &history[history.len() - 2 * WINDOW..split]
    } else {
        &history[..split]
    };

    if older.is_empty() {
        return None;
    }

    Some(
        Metric::ALL
            .iter()
            .map(|metric| trend_for(*metric, recent, older))
            .collect(),
    )
}

fn trend_for(metric: Metric, recent: &[MetricRecord], older: &[MetricRecord]) -> TrendResult {
    let recent_avg = mean(metric, recent);
    let older_avg = mean(metric, older);

    // Division by zero is sidestepped, not an error: an all-zero older
    // window means the percentage change is undefined.
    if older_avg == 0.0 {
        return TrendResult {
            metric,
            change_pct: 0.0,
            direction: TrendDirection::NotApplicable,
        };
    }

    let change_pct = (recent_avg - older_avg) / older_avg * 100.0;
    TrendResult {
        metric,
        change_pct,
        direction: classify(change_pct),
    }
}

fn mean(metric: Metric, records: &[MetricRecord]) -> f64 {
    let sum: f64 = records.iter().map(|r| metric.value_of(r)).sum();
    sum / records.len() as f64
}

fn classify(change_pct: f64) -> TrendDirection {
    if change_pct > FLAT_BAND_PCT {
        TrendDirection::Up
    } else if change_pct < -FLAT_BAND_PCT {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    }
}
