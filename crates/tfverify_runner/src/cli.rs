//! CLI executor for the provisioning binary.
//!
//! This module runs `terraform` or `tofu` as a child process, with
//! automatic detection and fallback between the two.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{CommandSpec, ExecOptions};
use crate::error::{ExecError, ExecResult};
use crate::exec::{ExecutionResult, Executor};

/// Provisioning binary flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerraformBinary {
    Terraform,
    Tofu,
}

impl TerraformBinary {
    /// Get the CLI command name.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
            Self::Tofu => "tofu",
        }
    }
}

impl std::fmt::Display for TerraformBinary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// CLI executor options.
#[derive(Debug, Clone)]
pub struct CliExecutorOptions {
    /// Preferred binary (if not set, auto-detect)
    pub preferred_binary: Option<TerraformBinary>,
    /// Dry-run mode (print commands without executing)
    pub dry_run: bool,
    /// CI mode (format streamed logs for CI systems)
    pub ci_mode: bool,
}

impl Default for CliExecutorOptions {
    fn default() -> Self {
        Self {
            preferred_binary: None,
            dry_run: false,
            ci_mode: std::env::var("CI").is_ok(),
        }
    }
}

impl CliExecutorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn ci_mode(mut self) -> Self {
        self.ci_mode = true;
        self
    }

    pub fn prefer_terraform(mut self) -> Self {
        self.preferred_binary = Some(TerraformBinary::Terraform);
        self
    }

    pub fn prefer_tofu(mut self) -> Self {
        self.preferred_binary = Some(TerraformBinary::Tofu);
        self
    }
}

/// CLI executor.
///
/// Runs the provisioning binary directly as a child process, capturing
/// stdout and stderr line by line.
pub struct CliExecutor {
    binary: TerraformBinary,
    options: CliExecutorOptions,
}

impl CliExecutor {
    /// Create a new executor with automatic binary detection.
    pub fn new(options: CliExecutorOptions) -> ExecResult<Self> {
        let binary = Self::detect_binary(&options)?;
        info!("Using provisioning binary: {}", binary);

        Ok(Self { binary, options })
    }

    /// Create an executor with a specific binary.
    pub fn with_binary(binary: TerraformBinary, options: CliExecutorOptions) -> Self {
        Self { binary, options }
    }

    /// Detect an available provisioning binary.
    pub fn detect_binary(options: &CliExecutorOptions) -> ExecResult<TerraformBinary> {
        // Check preferred binary first
        if let Some(preferred) = options.preferred_binary {
            if Self::is_binary_available(preferred) {
                return Ok(preferred);
            }
            warn!(
                "Preferred binary {} not available, trying alternatives",
                preferred
            );
        }

        if Self::is_binary_available(TerraformBinary::Terraform) {
            return Ok(TerraformBinary::Terraform);
        }

        if Self::is_binary_available(TerraformBinary::Tofu) {
            return Ok(TerraformBinary::Tofu);
        }

        Err(ExecError::BinaryNotAvailable(
            "Neither terraform nor tofu is available".to_string(),
        ))
    }

    /// Check if a binary answers a version probe.
    fn is_binary_available(binary: TerraformBinary) -> bool {
        Command::new(binary.command())
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Get the current binary.
    pub fn binary(&self) -> TerraformBinary {
        self.binary
    }

    /// Check if dry-run mode is enabled.
    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Format a command line for logging.
    fn format_command(&self, spec: &CommandSpec) -> String {
        let mut cmd = self.binary.command().to_string();
        for arg in &spec.args {
            if arg.contains(' ') || arg.contains('=') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push_str(&format!(" {}", arg));
            }
        }
        cmd
    }

    /// Execute a command and capture output with streaming.
    fn execute_with_streaming(
        &self,
        spec: &CommandSpec,
        options: &ExecOptions,
    ) -> ExecResult<(i64, String, String)> {
        let mut cmd = Command::new(self.binary.command());
        cmd.args(&spec.args);
        cmd.current_dir(&spec.working_dir);
        cmd.envs(&spec.env);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!("Executing: {}", self.format_command(spec));

        let mut child = cmd.spawn().map_err(|e| {
            ExecError::ExecutionFailed(format!("Failed to spawn {}: {}", self.binary, e))
        })?;

        let stdout = child.stdout.take().unwrap();
        let stderr = child.stderr.take().unwrap();

        let stdout_handle = std::thread::spawn({
            let stream_logs = options.stream_logs;
            let ci_mode = self.options.ci_mode;
            move || {
                let reader = BufReader::new(stdout);
                let mut output = String::new();
                for line in reader.lines().map_while(Result::ok) {
                    output.push_str(&line);
                    output.push('\n');
                    if stream_logs {
                        if ci_mode {
                            println!(
                                "[{}] [stdout] {}",
                                Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                                line
                            );
                        } else {
                            println!("{}", line);
                        }
                    }
                }
                output
            }
        });

        let stderr_handle = std::thread::spawn({
            let stream_logs = options.stream_logs;
            let ci_mode = self.options.ci_mode;
            move || {
                let reader = BufReader::new(stderr);
                let mut output = String::new();
                for line in reader.lines().map_while(Result::ok) {
                    output.push_str(&line);
                    output.push('\n');
                    if stream_logs {
                        if ci_mode {
                            println!(
                                "[{}] [stderr] {}",
                                Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                                line
                            );
                        } else {
                            eprintln!("{}", line);
                        }
                    }
                }
                output
            }
        });

        // Wait for completion with timeout
        let status = if options.timeout_seconds > 0 {
            let timeout = std::time::Duration::from_secs(options.timeout_seconds);
            let start = Instant::now();
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) => {
                        if start.elapsed() > timeout {
                            let _ = child.kill();
                            return Err(ExecError::Timeout(options.timeout_seconds));
                        }
                        std::thread::sleep(std::time::Duration::from_millis(100));
                    }
                    Err(e) => {
                        return Err(ExecError::ExecutionFailed(format!(
                            "Failed to wait for process: {}",
                            e
                        )));
                    }
                }
            }
        } else {
            child.wait().map_err(|e| {
                ExecError::ExecutionFailed(format!("Failed to wait for process: {}", e))
            })?
        };

        let stdout_output = stdout_handle.join().unwrap_or_default();
        let stderr_output = stderr_handle.join().unwrap_or_default();

        let exit_code = status.code().unwrap_or(-1) as i64;

        Ok((exit_code, stdout_output, stderr_output))
    }
}

#[async_trait]
impl Executor for CliExecutor {
    async fn is_available(&self) -> ExecResult<bool> {
        Ok(Self::is_binary_available(self.binary))
    }

    async fn version(&self) -> ExecResult<String> {
        let output = Command::new(self.binary.command())
            .arg("version")
            .output()
            .map_err(|e| ExecError::ExecutionFailed(e.to_string()))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout.lines().next().unwrap_or("").to_string())
        } else {
            Err(ExecError::ExecutionFailed(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ))
        }
    }

    async fn run(&self, spec: &CommandSpec, options: &ExecOptions) -> ExecResult<ExecutionResult> {
        let cmd_str = self.format_command(spec);

        info!(
            "Running {} {} in {:?}",
            self.binary,
            spec.operation(),
            spec.working_dir
        );

        if self.options.dry_run {
            info!("[DRY-RUN] Would execute: {}", cmd_str);
            return Ok(ExecutionResult {
                execution_id: "dry-run".to_string(),
                exit_code: 0,
                stdout: format!("[DRY-RUN] Command: {}", cmd_str),
                stderr: String::new(),
                started_at: Utc::now(),
                finished_at: Utc::now(),
                duration_ms: 0,
            });
        }

        let started_at = Utc::now();
        let (exit_code, stdout, stderr) = self.execute_with_streaming(spec, options)?;
        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds() as u64;

        if exit_code == 0 {
            info!(
                "{} {} completed in {}ms",
                self.binary,
                spec.operation(),
                duration_ms
            );
        } else {
            error!(
                "{} {} failed with exit code {} after {}ms",
                self.binary,
                spec.operation(),
                exit_code,
                duration_ms
            );
        }

        Ok(ExecutionResult {
            execution_id: format!("{}-{}", self.binary, uuid::Uuid::new_v4()),
            exit_code,
            stdout,
            stderr,
            started_at,
            finished_at,
            duration_ms,
        })
    }
}
