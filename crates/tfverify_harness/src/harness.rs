//! The example verification lifecycle.

use std::path::PathBuf;

use tracing::{error, info, warn};

use tfverify_terraform::{OutputMap, Terraform, TerraformOptions, TfResult};

use crate::error::{HarnessError, HarnessResult};

/// Scoped-cleanup guard around a set of provisioned resources.
///
/// Created as soon as the configuration handle exists, before the first
/// tool invocation, so cleanup is scheduled ahead of anything that can
/// fail. Destroy must be awaited explicitly; a guard dropped without it
/// logs the leak (Drop cannot run the async destroy itself).
pub struct Deployment<'a> {
    tf: &'a Terraform,
    options: &'a TerraformOptions,
    destroy_attempted: bool,
}

impl<'a> Deployment<'a> {
    pub fn new(tf: &'a Terraform, options: &'a TerraformOptions) -> Self {
        Self {
            tf,
            options,
            destroy_attempted: false,
        }
    }

    /// Tear down everything this deployment provisioned.
    pub async fn destroy(mut self) -> TfResult<()> {
        self.destroy_attempted = true;
        self.tf.destroy(self.options).await
    }
}

impl Drop for Deployment<'_> {
    fn drop(&mut self) {
        if !self.destroy_attempted {
            warn!(
                "deployment for {:?} dropped without destroy; external resources may leak",
                self.options.terraform_dir
            );
        }
    }
}

/// One example verification case: a configuration directory plus the
/// top-level output key to fetch after apply.
pub struct ExampleTest {
    options: TerraformOptions,
    outputs_key: String,
}

impl ExampleTest {
    /// Case for the given example directory, with the default
    /// transient-error retry policy installed.
    pub fn new(example_dir: impl Into<PathBuf>, outputs_key: impl Into<String>) -> Self {
        Self {
            options: TerraformOptions::with_default_retryable_errors(example_dir),
            outputs_key: outputs_key.into(),
        }
    }

    /// Case with fully custom options (vars, retry policy, timeouts).
    pub fn with_options(options: TerraformOptions, outputs_key: impl Into<String>) -> Self {
        Self {
            options,
            outputs_key: outputs_key.into(),
        }
    }

    pub fn options(&self) -> &TerraformOptions {
        &self.options
    }

    /// Run the full lifecycle and the caller's assertions.
    ///
    /// Destroy runs on every exit path. A destroy failure after a
    /// successful lifecycle surfaces as [`HarnessError::CleanupFailed`];
    /// after a failed lifecycle it is logged and the lifecycle error is
    /// returned.
    pub async fn run<F>(&self, tf: &Terraform, check: F) -> HarnessResult<()>
    where
        F: FnOnce(&OutputMap) -> HarnessResult<()>,
    {
        let deployment = Deployment::new(tf, &self.options);

        let lifecycle = self.lifecycle(tf, check).await;
        let cleanup = deployment.destroy().await;

        match (lifecycle, cleanup) {
            (Ok(()), Ok(())) => {
                info!("example {:?} verified", self.options.terraform_dir);
                Ok(())
            }
            (Ok(()), Err(destroy_err)) => Err(HarnessError::CleanupFailed {
                source: destroy_err,
            }),
            (Err(lifecycle_err), Ok(())) => Err(lifecycle_err),
            (Err(lifecycle_err), Err(destroy_err)) => {
                error!(
                    "destroy failed after earlier error in {:?}: {}",
                    self.options.terraform_dir, destroy_err
                );
                Err(lifecycle_err)
            }
        }
    }

    async fn lifecycle<F>(&self, tf: &Terraform, check: F) -> HarnessResult<()>
    where
        F: FnOnce(&OutputMap) -> HarnessResult<()>,
    {
        tf.init_and_apply(&self.options).await?;
        tf.apply_and_idempotent(&self.options).await?;

        let outputs = tf
            .output_map_of_objects(&self.options, &self.outputs_key)
            .await?;
        check(&outputs)
    }
}
