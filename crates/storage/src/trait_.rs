//! History store trait abstraction.

use async_trait::async_trait;
use perfwatch_core::MetricRecord;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage abstraction for the metric history.
///
/// The history is an ordered, append-only sequence of records; insertion
/// order is taken to be chronological collection order. Implementations
/// persist the full sequence on every save.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the persisted history.
    ///
    /// A missing, unreadable, or corrupt history yields an empty sequence;
    /// load never fails the caller.
    async fn load(&self) -> Result<Vec<MetricRecord>>;

    /// Persist the full history and the latest record.
    ///
    /// Both views are completely rewritten before this returns.
    async fn save(&self, history: &[MetricRecord], latest: &MetricRecord) -> Result<()>;
}
