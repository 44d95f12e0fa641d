//! The monitor engine - invokes, extracts, persists, reports.

use std::time::Duration;

use perfwatch_core::MetricRecord;
use perfwatch_runner::{RunProfile, TestRunner};
use perfwatch_storage::HistoryStore;
use tracing::{error, info};

/// Configuration for the monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Which test profile each cycle runs
    pub profile: RunProfile,
    /// Pause between cycles in continuous mode
    pub interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            profile: RunProfile::Quick,
            interval: Duration::from_secs(300),
        }
    }
}

/// Outcome of one collection cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleResult {
    /// The runner succeeded and a record was extracted and persisted.
    Collected(MetricRecord),
    /// The invocation failed; nothing was extracted or persisted.
    Failed(String),
}

/// The monitoring engine.
///
/// Owns the in-memory history for the life of the process: loaded once at
/// start, appended to on every successful cycle, fully re-persisted after
/// each append.
pub struct Monitor<S: HistoryStore, R: TestRunner> {
    store: S,
    runner: R,
    history: Vec<MetricRecord>,
    config: MonitorConfig,
}

impl<S: HistoryStore, R: TestRunner> Monitor<S, R> {
    /// Create a monitor, loading any previously persisted history.
    pub async fn new(store: S, runner: R) -> anyhow::Result<Self> {
        let history = store.load().await?;
        info!("loaded {} historical records", history.len());

        Ok(Self {
            store,
            runner,
            history,
            config: MonitorConfig::default(),
        })
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// The in-memory history, oldest first.
    pub fn history(&self) -> &[MetricRecord] {
        &self.history
    }

    /// Run one collection cycle.
    ///
    /// A failed invocation is reported and skipped - the history and the
    /// persisted files are left untouched. Only a persistence failure after
    /// a successful run is escalated to the caller.
    pub async fn run_once(&mut self) -> anyhow::Result<CycleResult> {
        info!(profile = ?self.config.profile, "running performance test");

        let output = match self.runner.run(self.config.profile).await {
            Ok(output) => output,
            Err(e) => {
                error!("performance test failed: {e}");
                return Ok(CycleResult::Failed(e.to_string()));
            }
        };

        let record = perfwatch_extract::extract_metrics(&output);
        self.history.push(record.clone());
        self.store.save(&self.history, &record).await?;

        println!("{}", perfwatch_report::format_record(&record));

        if self.history.len() > 1 {
            match perfwatch_trend::analyze(&self.history) {
                Some(trends) => println!("{}", perfwatch_report::format_trends(&trends)),
                None => println!("Not enough historical data for trend analysis"),
            }
        }

        Ok(CycleResult::Collected(record))
    }

    /// Run cycles until interrupted.
    ///
    /// Failures never terminate the loop. Ctrl-C during the interval sleep
    /// exits cleanly; the persist of the already-finished cycle has
    /// completed by then, so no history is lost.
    pub async fn run_continuous(&mut self) -> anyhow::Result<()> {
        info!(
            interval_secs = self.config.interval.as_secs(),
            profile = ?self.config.profile,
            "starting continuous monitoring, press Ctrl+C to stop"
        );

        loop {
            if let CycleResult::Failed(reason) = self.run_once().await? {
                info!("cycle skipped: {reason}");
            }

            info!(
                "waiting {} seconds until next test",
                self.config.interval.as_secs()
            );
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("monitoring stopped");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use perfwatch_runner::RunnerError;
    use perfwatch_storage::JsonHistoryStore;

    /// Runner that replays canned outcomes in order.
    struct ScriptedRunner {
        outcomes: std::sync::Mutex<std::vec::IntoIter<Result<String, String>>>,
    }

    impl ScriptedRunner {
        fn new(outcomes: Vec<Result<String, String>>) -> Self {
            Self {
                outcomes: std::sync::Mutex::new(outcomes.into_iter()),
            }
        }
    }

    #[async_trait]
    impl TestRunner for ScriptedRunner {
        async fn run(&self, _profile: RunProfile) -> Result<String, RunnerError> {
            match self.outcomes.lock().unwrap().next() {
                Some(Ok(stdout)) => Ok(stdout),
                Some(Err(stderr)) => Err(RunnerError::Failed { stderr }),
                None => panic!("runner invoked more times than scripted"),
            }
        }
    }

    #[tokio::test]
    async fn successful_cycle_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();
        let runner = ScriptedRunner::new(vec![Ok("500.0 ops/sec".to_string())]);

        let mut monitor = Monitor::new(store, runner).await.unwrap();
        let result = monitor.run_once().await.unwrap();

        match result {
            CycleResult::Collected(record) => assert_eq!(record.throughput, 500.0),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(monitor.history().len(), 1);

        let reloaded = JsonHistoryStore::new(dir.path())
            .await
            .unwrap()
            .load()
            .await
            .unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].throughput, 500.0);
    }

    #[tokio::test]
    async fn failed_invocation_skips_extraction_and_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();
        let runner = ScriptedRunner::new(vec![Err("segfault".to_string())]);

        let mut monitor = Monitor::new(store, runner).await.unwrap();
        let result = monitor.run_once().await.unwrap();

        match result {
            CycleResult::Failed(reason) => assert!(reason.contains("segfault")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(monitor.history().is_empty());
        assert!(!dir.path().join("metrics_history.json").exists());
    }

    #[tokio::test]
    async fn monitor_resumes_from_persisted_history() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonHistoryStore::new(dir.path()).await.unwrap();
            let runner = ScriptedRunner::new(vec![Ok("100.0 ops/sec".to_string())]);
            let mut monitor = Monitor::new(store, runner).await.unwrap();
            monitor.run_once().await.unwrap();
        }

        let store = JsonHistoryStore::new(dir.path()).await.unwrap();
        let runner = ScriptedRunner::new(vec![Ok("200.0 ops/sec".to_string())]);
        let mut monitor = Monitor::new(store, runner).await.unwrap();
        assert_eq!(monitor.history().len(), 1);

        monitor.run_once().await.unwrap();
        assert_eq!(monitor.history().len(), 2);
        assert_eq!(monitor.history()[0].throughput, 100.0);
        assert_eq!(monitor.history()[1].throughput, 200.0);
    }

    #[tokio::test]
    async fn failure_then_success_keeps_collecting() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::new(dir.path()).await.unwrap();
        let runner = ScriptedRunner::new(vec![
            Err("flaky".to_string()),
            Ok("300.0 ops/sec".to_string()),
        ]);

        let mut monitor = Monitor::new(store, runner).await.unwrap();
        assert!(matches!(
            monitor.run_once().await.unwrap(),
            CycleResult::Failed(_)
        ));
        assert!(matches!(
            monitor.run_once().await.unwrap(),
            CycleResult::Collected(_)
        ));
        assert_eq!(monitor.history().len(), 1);
    }
}
