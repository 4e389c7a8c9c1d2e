//! Error types for the verification harness.

use thiserror::Error;

use tfverify_terraform::{OutputError, TerraformError};

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that fail an example verification run.
///
/// All four classes surface immediately; cleanup still runs for each.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Provisioning-tool invocation failure, including a non-idempotent
    /// second apply.
    #[error(transparent)]
    Terraform(#[from] TerraformError),

    /// Expected key absent or wrong kind while navigating outputs.
    #[error(transparent)]
    Shape(#[from] OutputError),

    /// Literal value mismatch.
    #[error("assertion failed for {field}: {message}")]
    Assertion { field: String, message: String },

    /// Destroy failed after an otherwise successful run.
    #[error("cleanup (destroy) failed: {source}")]
    CleanupFailed { source: TerraformError },
}

impl HarnessError {
    /// Build an assertion failure naming the offending field.
    pub fn assertion(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assertion {
            field: field.into(),
            message: message.into(),
        }
    }
}
