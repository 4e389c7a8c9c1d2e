//! Executor trait and execution result types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{CommandSpec, ExecOptions};
use crate::error::ExecResult;

/// Result of one binary invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Identifier for this invocation
    pub execution_id: String,
    /// Exit code from the process
    pub exit_code: i64,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined output (stdout + stderr).
    pub fn combined_output(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Last non-empty output line, for one-line failure messages.
    pub fn last_line(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .chain(self.stdout.lines().rev())
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
    }
}

/// Executor trait.
///
/// A non-zero exit code is reported through [`ExecutionResult::exit_code`],
/// not as an error: callers need the failing output to decide whether the
/// failure is transient.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Check if the provisioning binary is available.
    async fn is_available(&self) -> ExecResult<bool>;

    /// Get binary version information.
    async fn version(&self) -> ExecResult<String>;

    /// Run one invocation with the given configuration.
    async fn run(&self, spec: &CommandSpec, options: &ExecOptions) -> ExecResult<ExecutionResult>;
}
