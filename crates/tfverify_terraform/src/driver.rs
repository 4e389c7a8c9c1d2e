//! Terraform driver executing the provisioning lifecycle.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tfverify_runner::{CommandSpec, ExecOptions, ExecutionResult, Executor};

use crate::changes::ChangeCounts;
use crate::error::{TerraformError, TfResult};
use crate::options::TerraformOptions;
use crate::outputs::OutputMap;

/// Driver for the provisioning tool.
///
/// Holds the execution seam; every operation takes the per-example
/// [`TerraformOptions`] and runs one tool invocation, retried for
/// recognized transient errors per the configured policy.
pub struct Terraform {
    executor: Arc<dyn Executor>,
}

impl Terraform {
    /// Create a new driver.
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Run `terraform init`.
    pub async fn init(&self, options: &TerraformOptions) -> TfResult<()> {
        info!("Running init in {:?}", options.terraform_dir);
        let mut args = vec!["init".to_string(), "-input=false".to_string(), "-no-color".to_string()];
        args.extend(options.backend_args());

        let result = self.run_with_retry(options, args).await?;
        if result.success() {
            Ok(())
        } else {
            Err(TerraformError::InitFailed(result.last_line().to_string()))
        }
    }

    /// Run `terraform apply` and report the change counts.
    pub async fn apply(&self, options: &TerraformOptions) -> TfResult<ChangeCounts> {
        info!("Running apply in {:?}", options.terraform_dir);
        let result = self
            .run_with_retry(options, self.mutating_args("apply", options))
            .await?;
        if !result.success() {
            return Err(TerraformError::ApplyFailed(result.last_line().to_string()));
        }

        let counts = ChangeCounts::parse(&result.stdout)
            .ok_or(TerraformError::UnparsedChanges { operation: "apply" })?;
        info!("Apply complete: {}", counts);
        Ok(counts)
    }

    /// Run init followed by apply.
    pub async fn init_and_apply(&self, options: &TerraformOptions) -> TfResult<ChangeCounts> {
        self.init(options).await?;
        self.apply(options).await
    }

    /// Re-apply an already-applied configuration and require a no-op.
    ///
    /// A declared configuration must be a fixed point under repeated
    /// application; any reported change fails with
    /// [`TerraformError::NonIdempotent`].
    pub async fn apply_and_idempotent(&self, options: &TerraformOptions) -> TfResult<()> {
        let counts = self.apply(options).await?;
        if counts.is_noop() {
            Ok(())
        } else {
            Err(TerraformError::NonIdempotent { counts })
        }
    }

    /// Run `terraform plan` and report the planned change counts.
    pub async fn plan(&self, options: &TerraformOptions) -> TfResult<ChangeCounts> {
        info!("Running plan in {:?}", options.terraform_dir);
        let mut args = vec!["plan".to_string(), "-input=false".to_string(), "-no-color".to_string()];
        args.extend(options.var_args());

        let result = self.run_with_retry(options, args).await?;
        if !result.success() {
            return Err(TerraformError::PlanFailed(result.last_line().to_string()));
        }

        ChangeCounts::parse(&result.stdout)
            .ok_or(TerraformError::UnparsedChanges { operation: "plan" })
    }

    /// Run `terraform destroy`.
    pub async fn destroy(&self, options: &TerraformOptions) -> TfResult<()> {
        info!("Running destroy in {:?}", options.terraform_dir);
        let result = self
            .run_with_retry(options, self.mutating_args("destroy", options))
            .await?;
        if result.success() {
            Ok(())
        } else {
            Err(TerraformError::DestroyFailed(result.last_line().to_string()))
        }
    }

    /// Fetch one named output group as a nested generic structure.
    pub async fn output_map_of_objects(
        &self,
        options: &TerraformOptions,
        root_key: &str,
    ) -> TfResult<OutputMap> {
        info!("Reading output '{}' from {:?}", root_key, options.terraform_dir);
        let args = vec![
            "output".to_string(),
            "-no-color".to_string(),
            "-json".to_string(),
            root_key.to_string(),
        ];

        let result = self.run_with_retry(options, args).await?;
        if !result.success() {
            return Err(TerraformError::OutputFailed {
                key: root_key.to_string(),
                message: result.last_line().to_string(),
            });
        }

        let value = serde_json::from_str(&result.stdout)?;
        Ok(OutputMap::new(root_key, value))
    }

    /// Tool version, for diagnostics.
    pub async fn version(&self) -> TfResult<String> {
        Ok(self.executor.version().await?)
    }

    /// Arguments for a state-mutating command (apply/destroy).
    fn mutating_args(&self, command: &str, options: &TerraformOptions) -> Vec<String> {
        let mut args = vec![
            command.to_string(),
            "-input=false".to_string(),
            "-auto-approve".to_string(),
            "-no-color".to_string(),
        ];
        args.extend(options.var_args());
        args
    }

    /// Run one invocation, retrying failures whose output matches the
    /// configured transient patterns.
    async fn run_with_retry(
        &self,
        options: &TerraformOptions,
        args: Vec<String>,
    ) -> TfResult<ExecutionResult> {
        let spec = CommandSpec::new(options.terraform_dir.clone())
            .args(args)
            .env("TF_IN_AUTOMATION", "1");
        let exec_options = ExecOptions::default().timeout(options.command_timeout_secs);

        let mut attempt = 0;
        loop {
            let result = self.executor.run(&spec, &exec_options).await?;
            if result.success() {
                return Ok(result);
            }

            let output = result.combined_output();
            match options.retry.match_transient(&output) {
                Some(note) if attempt < options.retry.max_retries => {
                    attempt += 1;
                    warn!(
                        "{} failed with transient error ({}), retry {}/{}",
                        spec.operation(),
                        note,
                        attempt,
                        options.retry.max_retries
                    );
                    tokio::time::sleep(options.retry.wait_between).await;
                }
                Some(note) => {
                    debug!("{} still failing after retries ({})", spec.operation(), note);
                    return Ok(result);
                }
                None => return Ok(result),
            }
        }
    }
}
