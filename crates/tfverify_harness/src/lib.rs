//! # tfverify_harness
//!
//! Example verification harness for the Amazon Connect Terraform module.
//!
//! For each named example configuration the harness runs a fixed
//! lifecycle against the provisioning tool:
//!
//! 1. init, then apply
//! 2. apply again, asserting zero changes (idempotency check)
//! 3. read the named output group as a nested generic structure
//! 4. run the caller's assertions over it
//! 5. destroy, unconditionally, on every exit path
//!
//! The example verification tests themselves live under `tests/`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tfverify_harness::{check, ExampleTest};
//! use tfverify_runner::{CliExecutor, CliExecutorOptions};
//! use tfverify_terraform::Terraform;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = Arc::new(CliExecutor::new(CliExecutorOptions::default())?);
//!     let tf = Terraform::new(executor);
//!
//!     let example = ExampleTest::new("../examples/simple", "amazon_connect");
//!     example
//!         .run(&tf, |outputs| {
//!             let instance = outputs.field("instance")?;
//!             let id = instance.field("id")?;
//!             check::expect_non_empty(id.path(), id.as_str()?)?;
//!             Ok(())
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod check;
pub mod error;
pub mod harness;
pub mod ident;
pub mod logging;

pub use error::{HarnessError, HarnessResult};
pub use harness::{Deployment, ExampleTest};
pub use ident::unique_alias;
pub use logging::init_test_logging;
