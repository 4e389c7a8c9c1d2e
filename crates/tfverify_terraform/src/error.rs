//! Error types for the Terraform driver.

use thiserror::Error;

use crate::changes::ChangeCounts;
use crate::outputs::OutputError;
use tfverify_runner::ExecError;

/// Result type alias for driver operations.
pub type TfResult<T> = Result<T, TerraformError>;

/// Errors that can occur while driving the provisioning tool.
#[derive(Error, Debug)]
pub enum TerraformError {
    #[error("Terraform init failed: {0}")]
    InitFailed(String),

    #[error("Terraform apply failed: {0}")]
    ApplyFailed(String),

    #[error("Terraform plan failed: {0}")]
    PlanFailed(String),

    #[error("Terraform destroy failed: {0}")]
    DestroyFailed(String),

    #[error("Apply was not idempotent: second apply reported {counts}")]
    NonIdempotent { counts: ChangeCounts },

    #[error("Reading output '{key}' failed: {message}")]
    OutputFailed { key: String, message: String },

    #[error("Could not parse change counts from {operation} output")]
    UnparsedChanges { operation: &'static str },

    #[error("Invalid retryable-error pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Shape(#[from] OutputError),

    #[error("Executor error: {0}")]
    Exec(#[from] ExecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
