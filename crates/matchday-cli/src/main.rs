//! matchday CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use matchday_cli::cli::{Cli, Command, ConfigAction};
use matchday_cli::config::AppConfig;
use matchday_cli::error::{CliError, CliResult};
use matchday_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(err) = init_tracing(tracing_config) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(CliError::Config)?
    } else {
        AppConfig::load().map_err(CliError::Config)?
    };

    // One reference instant per run; the placeholder window and every
    // DTSTAMP hang off it.
    let now = Utc::now();

    match cli.command {
        Some(Command::Generate { input, output }) => {
            matchday_cli::commands::generate::run(&config, input.as_deref(), output.as_deref(), now)
        }
        Some(Command::Teams { input }) => {
            matchday_cli::commands::teams::run(&config, input.as_deref())
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => matchday_cli::commands::config::dump(&config),
            ConfigAction::Path => matchday_cli::commands::config::path(),
        },
        None => matchday_cli::commands::generate::run(&config, None, None, now),
    }
}
