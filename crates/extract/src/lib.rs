//! Extraction engine: test-runner output to metric records.
//!
//! The test runner emits unstructured text; this crate owns the textual
//! contract that turns it into a [`MetricRecord`]. The rules are deliberately
//! literal (substring markers, token scans) because the producer format is
//! unspecified - keeping them as a single pure function lets them be tested
//! exhaustively against fixture strings without running any process.

#![warn(missing_docs)]

mod parser;

pub use parser::extract_metrics;
