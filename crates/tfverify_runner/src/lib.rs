//! # tfverify_runner
//!
//! External CLI execution layer for tfverify.
//!
//! This crate provides one-shot execution of the provisioning binary
//! (`terraform` or `tofu`), with automatic binary detection, streamed
//! output capture, timeouts, and a mock executor for tests.
//!
//! # Features
//!
//! - **Binary Detection**: Auto-detect terraform vs tofu
//! - **Dry-Run Mode**: Print commands without executing
//! - **CI Integration**: Log formatting compatible with GitHub Actions
//! - **Mock Executor**: For testing without the external tool
//!
//! # Example
//!
//! ```rust,no_run
//! use tfverify_runner::{CliExecutor, CliExecutorOptions, Executor, CommandSpec, ExecOptions};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a CLI executor with auto-detection
//!     let executor = CliExecutor::new(CliExecutorOptions::default())?;
//!
//!     // Configure a version probe
//!     let spec = CommandSpec::new(PathBuf::from("."))
//!         .arg("version");
//!
//!     // Run the command
//!     let result = executor.run(&spec, &ExecOptions::default()).await?;
//!     println!("Exit code: {}", result.exit_code);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod mock;

pub use cli::{CliExecutor, CliExecutorOptions, TerraformBinary};
pub use config::{CommandSpec, ExecOptions};
pub use error::{ExecError, ExecResult};
pub use exec::{ExecutionResult, Executor};
pub use mock::{CapturedExec, MockExecutor, MockResponse};
