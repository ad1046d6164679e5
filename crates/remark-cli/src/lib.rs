//! Remark CLI library.
//!
//! This library provides the functionality behind the `remark` binary:
//! argument parsing, layered configuration, CSV ingestion and egress, and
//! the append-only failure log.

pub mod cli;
pub mod config;
pub mod error;
pub mod failure_log;
pub mod table;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use failure_log::FailureLog;
