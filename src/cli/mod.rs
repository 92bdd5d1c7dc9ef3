//! CLI command handlers for MtlSheet.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method returning
//! a [`CliResult`](common::CliResult).

pub mod common;
pub mod config;
pub mod convert;
pub mod inspect;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
pub use inspect::InspectArgs;
