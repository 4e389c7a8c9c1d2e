//! Command configuration types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single invocation of the provisioning binary.
///
/// The binary itself (terraform or tofu) is chosen by the executor;
/// the spec carries everything after the program name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Arguments passed to the binary
    pub args: Vec<String>,
    /// Working directory for the invocation
    pub working_dir: PathBuf,
    /// Extra environment variables
    pub env: HashMap<String, String>,
}

impl CommandSpec {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            args: Vec::new(),
            working_dir,
            env: HashMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// First argument, used as the operation name in logs.
    pub fn operation(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

/// Run configuration with timeout and capture behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecOptions {
    /// Timeout in seconds (0 = no timeout)
    pub timeout_seconds: u64,
    /// Whether to stream output lines as they arrive
    pub stream_logs: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            // Provisioning operations run seconds to minutes
            timeout_seconds: 3600,
            stream_logs: false,
        }
    }
}

impl ExecOptions {
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn stream(mut self) -> Self {
        self.stream_logs = true;
        self
    }
}
