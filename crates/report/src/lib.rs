//! Human-readable reporting for metric records and trend results.
//!
//! Textual formatting is always available; chart rendering is an optional
//! capability behind the `plot` cargo feature. Callers must fall back to
//! the textual report when [`chart_support`] is false.

#![warn(missing_docs)]

mod chart;
mod text;

pub use chart::{chart_support, render_chart, ChartError};
pub use text::{format_record, format_trends};
