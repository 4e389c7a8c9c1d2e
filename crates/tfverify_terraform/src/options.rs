//! Configuration handle for one example deployment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::retry::RetryPolicy;

/// Options identifying one example's declarative configuration directory,
/// plus the retry policy for transient provisioning errors.
///
/// Built once per test and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct TerraformOptions {
    /// Directory containing the declarative resource set
    pub terraform_dir: PathBuf,
    /// `-var` assignments passed to apply, plan, and destroy
    pub vars: BTreeMap<String, String>,
    /// `-var-file` arguments
    pub var_files: Vec<PathBuf>,
    /// `-backend-config` assignments passed to init
    pub backend_config: BTreeMap<String, String>,
    /// Retry policy for recognized transient errors
    pub retry: RetryPolicy,
    /// Per-command timeout in seconds (0 = none)
    pub command_timeout_secs: u64,
}

impl TerraformOptions {
    /// Options with no retries configured.
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            vars: BTreeMap::new(),
            var_files: Vec::new(),
            backend_config: BTreeMap::new(),
            retry: RetryPolicy::none(),
            command_timeout_secs: 3600,
        }
    }

    /// Options with the default transient-error retry policy installed.
    pub fn with_default_retryable_errors(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            retry: RetryPolicy::default_transient(),
            ..Self::new(terraform_dir)
        }
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    pub fn backend_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.backend_config.insert(key.into(), value.into());
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn command_timeout(mut self, seconds: u64) -> Self {
        self.command_timeout_secs = seconds;
        self
    }

    /// `-var key=value` argument pairs in deterministic order.
    pub fn var_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for path in &self.var_files {
            args.push(format!("-var-file={}", path.display()));
        }
        for (key, value) in &self.vars {
            args.push("-var".to_string());
            args.push(format!("{}={}", key, value));
        }
        args
    }

    /// `-backend-config=key=value` argument pairs for init.
    pub fn backend_args(&self) -> Vec<String> {
        self.backend_config
            .iter()
            .map(|(key, value)| format!("-backend-config={}={}", key, value))
            .collect()
    }
}
