//! Monitor loop - runs the collection cycle.
//!
//! ```text
//! Invoke runner → Extract → Persist → Report → (sleep | done)
//! ```
//!
//! Strictly sequential: one invocation at a time, the interval sleep is the
//! only suspension point, and the history is owned exclusively by the
//! monitor for its lifetime.

#![warn(missing_docs)]

mod engine;

pub use engine::{CycleResult, Monitor, MonitorConfig};
