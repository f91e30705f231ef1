//! Normalization configuration.
//!
//! The raw schedule carries no year, assumes one league's time zone, and
//! refers to the subject team by a roster shorthand. Everything needed to
//! resolve those ambiguities is supplied here per season rather than derived
//! at run time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use matchday_core::TimezoneSpec;

/// The two calendar years a season spans, plus the month that splits them.
///
/// Date text in the schedule has no year. Months at or after `cutoff_month`
/// belong to `start_year`; earlier months belong to `end_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonYears {
    /// Calendar year the season starts in.
    pub start_year: i32,
    /// Calendar year the season ends in.
    pub end_year: i32,
    /// First month of the season, 1-12.
    #[serde(default = "default_cutoff_month")]
    pub cutoff_month: u32,
}

fn default_cutoff_month() -> u32 {
    8
}

impl SeasonYears {
    /// Creates a season with the default August cutoff.
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            cutoff_month: default_cutoff_month(),
        }
    }

    /// Infers the calendar year of a game from its month number.
    pub fn infer_year(&self, month: u32) -> i32 {
        if month >= self.cutoff_month {
            self.start_year
        } else {
            self.end_year
        }
    }
}

/// Tunable normalization rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeRules {
    /// Assumed game length; the schedule publishes no end times.
    pub game_duration_minutes: i64,
    /// How many days ahead of "now" a TBD game may be to earn a placeholder
    /// event, inclusive.
    pub placeholder_lookahead_days: i64,
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self {
            game_duration_minutes: 120,
            placeholder_lookahead_days: 6,
        }
    }
}

/// Everything the normalizer needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Season year boundaries for year inference.
    pub season: SeasonYears,
    /// Target time zone with its daylight-saving transitions.
    pub timezone: TimezoneSpec,
    /// Duration and placeholder-window rules.
    pub rules: NormalizeRules,
    /// Roster shorthand to display-name substitutions, applied to titles,
    /// locations, and descriptions.
    pub team_aliases: BTreeMap<String, String>,
}

impl ScheduleConfig {
    /// Creates a config with default rules and no aliases.
    pub fn new(season: SeasonYears, timezone: TimezoneSpec) -> Self {
        Self {
            season,
            timezone,
            rules: NormalizeRules::default(),
            team_aliases: BTreeMap::new(),
        }
    }

    /// Builder method to set an alias.
    pub fn with_alias(mut self, shorthand: impl Into<String>, display: impl Into<String>) -> Self {
        self.team_aliases.insert(shorthand.into(), display.into());
        self
    }
}
