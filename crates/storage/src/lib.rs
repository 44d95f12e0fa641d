//! History persistence for perfwatch.
//!
//! This crate provides a trait-based store interface with a flat-file JSON
//! reference implementation. The history file is the full corpus: it is
//! rewritten in its entirety on every save, and a corrupt or missing file
//! loads as an empty history rather than failing startup.

#![warn(missing_docs)]

pub mod json_history;
pub mod trait_;

pub use json_history::JsonHistoryStore;
pub use trait_::{HistoryStore, Result, StorageError};
