//! Application configuration.
//!
//! All settings live in a single `config.toml` at
//! `~/.config/matchday/config.toml` by default. Every season-specific value
//! (years, timezone transitions, filter ids, aliases) is configuration, not
//! code; the defaults below are the sample a `config dump` starts from.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use matchday_core::TimezoneSpec;
use matchday_schedule::{CalendarMeta, FetchConfig, NormalizeRules, ScheduleConfig, SeasonYears};

/// Roster shorthand to display-name substitutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    /// Map of shorthand codes to display names.
    pub aliases: BTreeMap<String, String>,
}

/// Location of the optional exhibition CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitionSettings {
    /// Path to the exhibition file; absence of the file is not an error.
    pub file: Option<PathBuf>,
}

/// Where the calendar document is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output file path.
    pub file: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("lakehill_schedule.ics"),
        }
    }
}

/// Configuration for the matchday CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Schedule endpoint and request shaping.
    pub fetch: FetchConfig,

    /// Season year boundaries for year inference.
    pub season: SeasonYears,

    /// Target time zone with its daylight-saving transitions.
    pub timezone: TimezoneSpec,

    /// Duration and placeholder-window rules.
    pub rules: NormalizeRules,

    /// Team alias substitutions.
    pub teams: TeamSettings,

    /// Document-level calendar metadata.
    pub calendar: CalendarMeta,

    /// Optional exhibition file.
    pub exhibition: ExhibitionSettings,

    /// Output location.
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(
            "LSA U14BT3 Hart".to_string(),
            "Lakehill U14 Boys T3".to_string(),
        );
        Self {
            fetch: FetchConfig::default(),
            season: SeasonYears::new(2025, 2026),
            timezone: TimezoneSpec {
                tzid: "America/Vancouver".to_string(),
                standard_offset: "-08:00".parse().expect("valid offset"),
                daylight_offset: "-07:00".parse().expect("valid offset"),
                daylight_start: sample_transition(2026, 3, 8),
                daylight_end: sample_transition(2025, 11, 2),
            },
            rules: NormalizeRules::default(),
            teams: TeamSettings { aliases },
            calendar: CalendarMeta::default(),
            exhibition: ExhibitionSettings {
                file: Some(PathBuf::from("exhibition.csv")),
            },
            output: OutputSettings::default(),
        }
    }
}

fn sample_transition(year: i32, month: u32, day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(2, 0, 0)
        .expect("valid time")
}

impl AppConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the sample defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matchday")
    }

    /// Assembles the normalizer's configuration view.
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            season: self.season.clone(),
            timezone: self.timezone.clone(),
            rules: self.rules.clone(),
            team_aliases: self.teams.aliases.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn roundtrips_through_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[season]
start_year = 2026
end_year = 2027

[output]
file = "out.ics"
"#
        )
        .unwrap();
        let config = AppConfig::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.season.start_year, 2026);
        assert_eq!(config.season.cutoff_month, 8);
        assert_eq!(config.output.file, PathBuf::from("out.ics"));
        // Untouched sections keep their defaults.
        assert_eq!(config.rules.game_duration_minutes, 120);
        assert_eq!(config.timezone.tzid, "America/Vancouver");
    }

    #[test]
    fn timezone_section_parses_offsets_and_transitions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[timezone]
tzid = "America/Edmonton"
standard_offset = "-07:00"
daylight_offset = "-06:00"
daylight_start = "2026-03-08T02:00:00"
daylight_end = "2025-11-02T02:00:00"
"#
        )
        .unwrap();
        let config = AppConfig::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.timezone.tzid, "America/Edmonton");
        assert_eq!(config.timezone.standard_offset.ics(), "-0700");
        assert_eq!(
            config.timezone.daylight_start,
            sample_transition(2026, 3, 8)
        );
    }

    #[test]
    fn schedule_config_carries_aliases() {
        let config = AppConfig::default();
        let schedule = config.schedule_config();
        assert_eq!(
            schedule.team_aliases.get("LSA U14BT3 Hart"),
            Some(&"Lakehill U14 Boys T3".to_string())
        );
    }
}
