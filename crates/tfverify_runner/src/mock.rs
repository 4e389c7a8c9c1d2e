//! Mock executor for testing.
//!
//! Provides a configurable mock implementation of the Executor trait for
//! use in tests without requiring terraform/tofu to be installed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::config::{CommandSpec, ExecOptions};
use crate::error::{ExecError, ExecResult};
use crate::exec::{ExecutionResult, Executor};

/// Predefined mock response for a command execution.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 100,
        }
    }

    pub fn failure(exit_code: i64, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration_ms: 100,
        }
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }
}

/// Captured invocation for verification.
#[derive(Debug, Clone)]
pub struct CapturedExec {
    pub args: Vec<String>,
    pub working_dir: std::path::PathBuf,
    pub env: std::collections::HashMap<String, String>,
}

impl CapturedExec {
    /// First argument (the subcommand), for call filtering.
    pub fn operation(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

/// Mock executor for testing.
///
/// Captures all invocations and returns predefined responses, allowing
/// tests to script entire provisioning lifecycles without running the
/// external tool.
#[derive(Clone)]
pub struct MockExecutor {
    /// Whether the executor should report as available.
    available: Arc<RwLock<bool>>,
    /// Version string to return.
    version: Arc<RwLock<String>>,
    /// Predefined responses for run calls.
    responses: Arc<RwLock<Vec<MockResponse>>>,
    /// Index of next response to return.
    response_index: Arc<AtomicUsize>,
    /// Captured invocations for verification.
    captured: Arc<RwLock<Vec<CapturedExec>>>,
    /// Simulated failure message for ExecutionFailed.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        Self {
            available: Arc::new(RwLock::new(true)),
            version: Arc::new(RwLock::new("Terraform v1.6.0".to_string())),
            responses: Arc::new(RwLock::new(Vec::new())),
            response_index: Arc::new(AtomicUsize::new(0)),
            captured: Arc::new(RwLock::new(Vec::new())),
            simulate_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Set whether the executor is available.
    pub fn set_available(self, available: bool) -> Self {
        *self.available.write() = available;
        self
    }

    /// Set the version string.
    pub fn set_version(self, version: impl Into<String>) -> Self {
        *self.version.write() = version.into();
        self
    }

    /// Add a mock response for the next run call.
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.write().push(response);
        self
    }

    /// Set multiple responses.
    pub fn with_responses(self, responses: Vec<MockResponse>) -> Self {
        *self.responses.write() = responses;
        self
    }

    /// Set a failure to simulate on every call.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Clear all captured invocations.
    pub fn clear_calls(&self) {
        self.captured.write().clear();
    }

    /// Get all captured invocations.
    pub fn get_calls(&self) -> Vec<CapturedExec> {
        self.captured.read().clone()
    }

    /// Get the number of invocations made.
    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    /// Check if an operation (first argument) was invoked.
    pub fn was_invoked(&self, operation: &str) -> bool {
        self.captured
            .read()
            .iter()
            .any(|c| c.operation() == operation)
    }

    /// Get invocations of a specific operation.
    pub fn get_operation_calls(&self, operation: &str) -> Vec<CapturedExec> {
        self.captured
            .read()
            .iter()
            .filter(|c| c.operation() == operation)
            .cloned()
            .collect()
    }

    /// Record an invocation.
    fn record_call(&self, call: CapturedExec) {
        self.captured.write().push(call);
    }

    /// Get the next response.
    fn next_response(&self) -> MockResponse {
        let responses = self.responses.read();
        if responses.is_empty() {
            return MockResponse::success("");
        }
        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        responses
            .get(index % responses.len())
            .cloned()
            .unwrap_or_else(|| MockResponse::success(""))
    }

    /// Check for simulated failure.
    fn check_failure(&self) -> ExecResult<()> {
        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(ExecError::ExecutionFailed(msg));
        }
        Ok(())
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn is_available(&self) -> ExecResult<bool> {
        Ok(*self.available.read())
    }

    async fn version(&self) -> ExecResult<String> {
        self.check_failure()?;
        Ok(self.version.read().clone())
    }

    async fn run(&self, spec: &CommandSpec, _options: &ExecOptions) -> ExecResult<ExecutionResult> {
        self.record_call(CapturedExec {
            args: spec.args.clone(),
            working_dir: spec.working_dir.clone(),
            env: spec.env.clone(),
        });

        self.check_failure()?;

        let response = self.next_response();
        let started_at = Utc::now();
        let finished_at = started_at + chrono::Duration::milliseconds(response.duration_ms as i64);

        Ok(ExecutionResult {
            execution_id: format!("mock-{}", uuid::Uuid::new_v4()),
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            started_at,
            finished_at,
            duration_ms: response.duration_ms,
        })
    }
}
