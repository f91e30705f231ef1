//! matchday command-line interface.
//!
//! This crate wires the schedule pipeline to a `matchday` binary:
//! configuration loading, the generate/teams/config subcommands, and the
//! output file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, CliResult};
