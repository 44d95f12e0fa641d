//! Flat-file JSON history store.
//!
//! Keeps two files in the results directory: `metrics_history.json`, a JSON
//! array of every record collected, and `latest_metrics.json`, a one-record
//! view of the most recent observation. Both are rewritten in full on every
//! save; there is no compaction or eviction.

use std::path::{Path, PathBuf};

use perfwatch_core::MetricRecord;
use tokio::fs;

use super::{HistoryStore, Result};

const HISTORY_FILE: &str = "metrics_history.json";
const LATEST_FILE: &str = "latest_metrics.json";

/// File-based JSON history store.
pub struct JsonHistoryStore {
    root: PathBuf,
}

impl JsonHistoryStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the history files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    fn latest_path(&self) -> PathBuf {
        self.root.join(LATEST_FILE)
    }
}

#[async_trait::async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn load(&self) -> Result<Vec<MetricRecord>> {
        let path = self.history_path();
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!("could not read {}: {}, starting fresh", path.display(), e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&json) {
            Ok(history) => Ok(history),
            Err(e) => {
                tracing::warn!("corrupt history in {}: {}, starting fresh", path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, history: &[MetricRecord], latest: &MetricRecord) -> Result<()> {
        let history_json = serde_json::to_string_pretty(history)?;
        fs::write(self.history_path(), history_json.as_bytes()).await?;

        let latest_json = serde_json::to_string_pretty(latest)?;
        fs::write(self.latest_path(), latest_json.as_bytes()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfwatch_core::MetricRecord;

    fn sample(throughput: f64) -> MetricRecord {
        let mut record = MetricRecord::new();
        record.throughput = throughput;
        record.tests_passed = 9;
        record.tests_total = 10;
        record
    }

    #[tokio::test]
    async fn load_of_missing_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();

        let history = store.load().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();

        let history = vec![sample(100.0), sample(200.0), sample(300.0)];
        store.save(&history, history.last().unwrap()).await.unwrap();

        let restored = store.load().await.unwrap();
        assert_eq!(restored, history);
    }

    #[tokio::test]
    async fn save_rewrites_latest_view() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();

        let history = vec![sample(100.0), sample(250.0)];
        store.save(&history, &history[1]).await.unwrap();

        let latest_json =
            std::fs::read_to_string(dir.path().join("latest_metrics.json")).unwrap();
        let latest: MetricRecord = serde_json::from_str(&latest_json).unwrap();
        assert_eq!(latest, history[1]);
    }

    #[tokio::test]
    async fn corrupt_history_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();

        std::fs::write(dir.path().join("metrics_history.json"), "not json {").unwrap();

        let history = store.load().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_previous_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();

        let first = vec![sample(1.0)];
        store.save(&first, &first[0]).await.unwrap();

        let second = vec![sample(1.0), sample(2.0)];
        store.save(&second, &second[1]).await.unwrap();

        let restored = store.load().await.unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored, second);
    }

    #[tokio::test]
    async fn store_creates_results_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("perf");

        let store = JsonHistoryStore::new(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.root(), nested.as_path());
    }
}
