//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// matchday - league schedule to calendar feed
#[derive(Debug, Parser)]
#[command(name = "matchday")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MATCHDAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands. Running without one generates the calendar.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the schedule and write the calendar file
    Generate {
        /// Read the markup fragment from a file instead of fetching
        #[arg(long)]
        input: Option<PathBuf>,

        /// Where to write the calendar document
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List teams discovered in the schedule markup
    Teams {
        /// Read the markup fragment from a file instead of fetching
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
    /// Show the configuration file path
    Path,
}
