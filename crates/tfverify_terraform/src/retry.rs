//! Retry policy for transient provisioning errors.

use std::time::Duration;

use regex::Regex;

/// One recognized transient-error pattern.
#[derive(Debug, Clone)]
pub struct RetryablePattern {
    regex: Regex,
    note: String,
}

/// Retry policy matched against the combined output of a failed command.
///
/// Only failures whose output matches a configured pattern are retried;
/// everything else surfaces immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Wait between attempts
    pub wait_between: Duration,
    patterns: Vec<RetryablePattern>,
}

/// Transient errors the provisioning tool is known to recover from on a
/// repeat attempt. Matched against combined stdout and stderr.
const DEFAULT_TRANSIENT: &[(&str, &str)] = &[
    (
        r"(?i)throttling",
        "throttled by the provider API, retrying",
    ),
    (
        r"(?i)request limit exceeded",
        "provider request limit hit, retrying",
    ),
    (
        r"connection reset by peer",
        "connection reset while talking to the provider, retrying",
    ),
    (
        r"TLS handshake timeout",
        "TLS handshake timeout against registry or backend, retrying",
    ),
    (
        r"RequestError: send request failed",
        "intermittent network error, retrying",
    ),
    (
        r"timeout while waiting for plugin to start",
        "provider plugin failed to start in time, retrying",
    ),
    (
        r"Failed to load state.*timeout",
        "state load timed out, retrying",
    ),
    (
        r"Error configuring the backend.*timeout",
        "backend configuration timed out, retrying",
    ),
];

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            wait_between: Duration::ZERO,
            patterns: Vec::new(),
        }
    }

    /// Policy covering the default transient provisioning errors,
    /// 3 retries with 5 seconds between attempts.
    pub fn default_transient() -> Self {
        let patterns = DEFAULT_TRANSIENT
            .iter()
            .map(|(pattern, note)| RetryablePattern {
                regex: Regex::new(pattern).expect("default pattern compiles"),
                note: (*note).to_string(),
            })
            .collect();

        Self {
            max_retries: 3,
            wait_between: Duration::from_secs(5),
            patterns,
        }
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn wait_between(mut self, wait: Duration) -> Self {
        self.wait_between = wait;
        self
    }

    /// Add a custom pattern; the note is logged when the pattern triggers
    /// a retry.
    pub fn pattern(mut self, pattern: &str, note: impl Into<String>) -> Result<Self, regex::Error> {
        self.patterns.push(RetryablePattern {
            regex: Regex::new(pattern)?,
            note: note.into(),
        });
        Ok(self)
    }

    /// Return the note of the first pattern matching the output, if any.
    pub fn match_transient(&self, output: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(output))
            .map(|p| p.note.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
