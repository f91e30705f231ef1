//! Team discovery command.
//!
//! Prints the (id, name) pairs referenced by the schedule markup. Useful
//! when hunting for the team and division filter ids a new season needs.

use std::fs;
use std::path::Path;

use matchday_schedule::{ScheduleFetcher, discover_teams};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Runs the teams command.
pub fn run(config: &AppConfig, input: Option<&Path>) -> CliResult<()> {
    let markup = match input {
        Some(path) => fs::read_to_string(path)?,
        None => ScheduleFetcher::new(config.fetch.clone())?.fetch_markup()?,
    };

    let teams = discover_teams(&markup);
    if teams.is_empty() {
        println!("No teams found.");
        return Ok(());
    }

    for team in teams {
        println!("{:>8}  {}", team.id, team.name);
    }
    Ok(())
}
