//! # tfverify_terraform
//!
//! Terraform lifecycle driver for tfverify.
//!
//! This crate turns the execution layer into the four provisioning
//! operations the verification harness needs (init, apply, destroy, read
//! outputs), plus the idempotency check, transient-error retries, and
//! fallible navigation over the returned output structure.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use tfverify_runner::{CliExecutor, CliExecutorOptions};
//! use tfverify_terraform::{Terraform, TerraformOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = Arc::new(CliExecutor::new(CliExecutorOptions::default())?);
//!     let tf = Terraform::new(executor);
//!
//!     let options = TerraformOptions::with_default_retryable_errors(
//!         PathBuf::from("./examples/simple"),
//!     );
//!
//!     tf.init_and_apply(&options).await?;
//!     tf.apply_and_idempotent(&options).await?;
//!
//!     let outputs = tf.output_map_of_objects(&options, "amazon_connect").await?;
//!     let instance_id = outputs.root().field("instance")?.string("id")?;
//!     println!("instance: {instance_id}");
//!
//!     tf.destroy(&options).await?;
//!     Ok(())
//! }
//! ```

pub mod changes;
pub mod driver;
pub mod error;
pub mod options;
pub mod outputs;
pub mod retry;

pub use changes::ChangeCounts;
pub use driver::Terraform;
pub use error::{TerraformError, TfResult};
pub use options::TerraformOptions;
pub use outputs::{OutputError, OutputMap, OutputResult, OutputValue};
pub use retry::RetryPolicy;
