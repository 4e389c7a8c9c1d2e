//! Error types for the execution layer.

use thiserror::Error;

/// Result type alias for executor operations.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors that can occur while invoking the external binary.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Provisioning binary not available: {0}")]
    BinaryNotAvailable(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Command timeout after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
