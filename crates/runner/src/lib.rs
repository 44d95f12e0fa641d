//! External test-runner invocation.
//!
//! The performance test is an opaque external process: it is spawned,
//! bounded by a profile-dependent timeout, and judged only by its exit
//! status and stdout text. A timed-out run is abandoned and never retried
//! within the same cycle.

#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Error type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors raised by a test invocation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The process exited nonzero; stderr is surfaced verbatim.
    #[error("performance test failed: {stderr}")]
    Failed {
        /// Captured standard error of the failed run
        stderr: String,
    },

    /// The process outlived its timeout and was abandoned.
    #[error("performance test timed out after {0:?}")]
    TimedOut(Duration),

    /// The process could not be started.
    #[error("could not start performance test: {0}")]
    Io(#[from] std::io::Error),
}

/// Which test profile to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunProfile {
    /// Abbreviated test, short timeout
    Quick,
    /// Full test, long timeout
    Full,
}

impl RunProfile {
    /// Wall-clock bound for one invocation.
    pub fn timeout(&self) -> Duration {
        match self {
            RunProfile::Quick => Duration::from_secs(300),
            RunProfile::Full => Duration::from_secs(1800),
        }
    }
}

/// Abstraction over the external test process.
#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Run one test invocation and return its stdout text on success.
    async fn run(&self, profile: RunProfile) -> Result<String>;
}

/// Runner that spawns a configurable command.
pub struct ProcessRunner {
    command: String,
    args: Vec<String>,
}

impl ProcessRunner {
    /// Create a runner for `command` with base arguments.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl Default for ProcessRunner {
    /// The conventional performance-test-runner invocation.
    fn default() -> Self {
        Self::new(
            "cargo",
            vec![
                "run".to_string(),
                "--release".to_string(),
                "--bin".to_string(),
                "performance-test-runner".to_string(),
            ],
        )
    }
}

#[async_trait]
impl TestRunner for ProcessRunner {
    async fn run(&self, profile: RunProfile) -> Result<String> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        if profile == RunProfile::Quick {
            cmd.arg("--quick-test");
        }

        tracing::debug!(command = %self.command, ?profile, "invoking performance test");

        let timeout = profile.timeout();
        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| RunnerError::TimedOut(timeout))??;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(RunnerError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_profile_has_short_bound() {
        assert_eq!(RunProfile::Quick.timeout(), Duration::from_secs(300));
        assert_eq!(RunProfile::Full.timeout(), Duration::from_secs(1800));
    }

    #[tokio::test]
    async fn captures_stdout_of_successful_run() {
        let runner = ProcessRunner::new("echo", vec!["1000.0 ops/sec".to_string()]);
        let output = runner.run(RunProfile::Full).await.unwrap();
        assert!(output.contains("1000.0 ops/sec"));
    }

    #[tokio::test]
    async fn quick_profile_appends_quick_test_flag() {
        let runner = ProcessRunner::new("echo", vec!["args:".to_string()]);
        let output = runner.run(RunProfile::Quick).await.unwrap();
        assert!(output.contains("--quick-test"));
    }

    #[tokio::test]
    async fn nonzero_exit_surfaces_stderr() {
        let runner = ProcessRunner::new(
            "sh",
            vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
        );
        let err = runner.run(RunProfile::Full).await.unwrap_err();
        match err {
            RunnerError::Failed { stderr } => assert!(stderr.contains("boom")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_an_io_error() {
        let runner = ProcessRunner::new("definitely-not-a-real-binary-xyz", vec![]);
        let err = runner.run(RunProfile::Full).await.unwrap_err();
        assert!(matches!(err, RunnerError::Io(_)));
    }
}
