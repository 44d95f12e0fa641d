//! Optional chart rendering.
//!
//! Behind the `plot` feature this renders a 2x2 grid of time series to a
//! PNG file with plotters. Without the feature the render call reports the
//! capability as unavailable so callers can degrade to the textual report.

use std::path::Path;

use perfwatch_core::MetricRecord;

/// Errors raised by chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Fewer than two records; there is no series to draw.
    #[error("not enough data for plotting")]
    NotEnoughData,

    /// The binary was built without the `plot` feature.
    #[error("chart rendering not available in this build")]
    Unavailable,

    /// The plotting backend failed.
    #[error("chart backend error: {0}")]
    Backend(String),
}

/// Whether this build can render charts.
pub fn chart_support() -> bool {
    cfg!(feature = "plot")
}

/// Render the history as a 2x2 chart grid (throughput, average latency,
/// memory usage, cache hit ratio) to a PNG at `path`.
///
/// Requires at least two records. The x axis is elapsed seconds since the
/// first record, so uneven collection intervals keep their spacing.
#[cfg(feature = "plot")]
pub fn render_chart(history: &[MetricRecord], path: &Path) -> Result<(), ChartError> {
    use plotters::prelude::*;

    if history.len() < 2 {
        return Err(ChartError::NotEnoughData);
    }

    let panels: [(&str, fn(&MetricRecord) -> f64, RGBColor); 4] = [
        ("Throughput (ops/sec)", |r| r.throughput, BLUE),
        ("Average Latency (ms)", |r| r.latency_avg, RED),
        ("Memory Usage (MB)", |r| r.memory_usage, GREEN),
        ("Cache Hit Ratio (%)", |r| r.cache_hit_ratio, MAGENTA),
    ];

    let t0 = history[0].timestamp;
    let xs: Vec<f64> = history
        .iter()
        .map(|r| (r.timestamp - t0).num_milliseconds() as f64 / 1000.0)
        .collect();
    let x_max = xs.last().copied().unwrap_or(0.0).max(1.0);

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(backend_err)?;
    let root = root
        .titled("Performance Metrics Over Time", ("sans-serif", 28))
        .map_err(backend_err)?;

    let areas = root.split_evenly((2, 2));

    for (area, (title, value_of, color)) in areas.iter().zip(panels.iter()) {
        let values: Vec<f64> = history.iter().map(|r| value_of(r)).collect();
        let y_max = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0) * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(*title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(backend_err)?;

        chart
            .configure_mesh()
            .x_desc("seconds since first sample")
            .draw()
            .map_err(backend_err)?;

        chart
            .draw_series(LineSeries::new(
                xs.iter().copied().zip(values.iter().copied()),
                color,
            ))
            .map_err(backend_err)?;

        chart
            .draw_series(
                xs.iter()
                    .copied()
                    .zip(values.iter().copied())
                    .map(|point| Circle::new(point, 3, color.filled())),
            )
            .map_err(backend_err)?;
    }

    root.present().map_err(backend_err)?;
    Ok(())
}

#[cfg(feature = "plot")]
fn backend_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Backend(e.to_string())
}

/// Stub used when the `plot` feature is disabled.
#[cfg(not(feature = "plot"))]
pub fn render_chart(_history: &[MetricRecord], _path: &Path) -> Result<(), ChartError> {
    Err(ChartError::Unavailable)
}
