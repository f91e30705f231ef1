//! Calendar generation, the default command.
//!
//! One run is one full regeneration: fetch (or read) the markup, extract
//! and normalize the rows, fold in exhibition games, emit the document,
//! write the file. Nothing is kept between runs.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use matchday_schedule::{
    RunContext, ScheduleFetcher, build_calendar, extract_rows, load_exhibition,
    normalize_exhibition_rows, normalize_rows,
};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Counts reported after a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Events written to the document.
    pub events: usize,
    /// Rows and records skipped across both pools.
    pub skipped: usize,
}

/// Builds the calendar document from a markup fragment.
///
/// Pure with respect to the schedule input: the same markup, exhibition
/// data, and `now` produce a byte-identical document.
pub fn build_document(
    config: &AppConfig,
    markup: &str,
    now: DateTime<Utc>,
) -> (String, GenerateSummary) {
    let schedule_config = config.schedule_config();
    let rows = extract_rows(markup);

    let mut ctx = RunContext::new(now);
    let mut report = normalize_rows(&rows, &schedule_config, &mut ctx);
    let mut skipped = report.skips.len();

    if let Some(ref path) = config.exhibition.file {
        let records = load_exhibition(path);
        if !records.is_empty() {
            let exhibition = normalize_exhibition_rows(&records, &schedule_config);
            skipped += exhibition.skips.len();
            report.events.extend(exhibition.events);
        }
    }

    let document = build_calendar(
        &report.events,
        &config.calendar,
        &schedule_config.timezone,
        now,
    );
    let summary = GenerateSummary {
        events: report.events.len(),
        skipped,
    };
    (document, summary)
}

/// Runs the generate command.
pub fn run(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    now: DateTime<Utc>,
) -> CliResult<()> {
    let markup = match input {
        Some(path) => fs::read_to_string(path)?,
        None => ScheduleFetcher::new(config.fetch.clone())?.fetch_markup()?,
    };

    let (document, summary) = build_document(config, &markup, now);

    let out_path = output.unwrap_or_else(|| config.output.file.as_path());
    fs::write(out_path, &document)?;
    info!(
        events = summary.events,
        skipped = summary.skipped,
        path = %out_path.display(),
        "wrote calendar"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn run_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 5, 19, 0, 0).unwrap()
    }

    fn sample_markup() -> String {
        let row = |date: &str, time: &str, home: &str, away: &str, field: &str| {
            format!(
                r#"<div class="Schedule_Row">
                    <div class="Schedule_Date"><b>{date}</b></div>
                    <div class="Schedule_Time">{time}</div>
                    <div class="Schedule_Home_Text">{home}</div>
                    <div class="Schedule_Away_Text">{away}</div>
                    <div class="Schedule_Field_Text">{field}</div>
                </div>"#
            )
        };
        format!(
            "{}{}{}",
            row(
                "Sep 7 - Sunday",
                "6:30 PM",
                "LSA U14BT3 Hart",
                "Victoria FC",
                "Royal Athletic Park"
            ),
            row("Sep 14 - Sunday", "6:30 PM", "--", "Victoria FC", ""),
            row("Sep 10 - Wednesday", "TBD", "Bays United", "LSA U14BT3 Hart", ""),
        )
    }

    fn config_without_exhibition() -> AppConfig {
        let mut config = AppConfig::default();
        config.exhibition.file = None;
        config
    }

    #[test]
    fn builds_document_from_markup() {
        let config = config_without_exhibition();
        let (document, summary) = build_document(&config, &sample_markup(), run_now());

        // Timed game plus one placeholder; the bye produced nothing.
        assert_eq!(summary.events, 2);
        assert_eq!(summary.skipped, 1);
        assert!(document.contains("SUMMARY:Lakehill U14 Boys T3 vs Victoria FC"));
        assert!(document.contains("DTSTART;TZID=America/Vancouver:20250907T183000"));
        assert!(
            document.contains("SUMMARY:Bays United vs Lakehill U14 Boys T3 (TBD)")
        );
        assert!(document.contains("DTSTART;VALUE=DATE:20250910"));
    }

    #[test]
    fn folds_in_exhibition_games() {
        let mut exhibition = tempfile::NamedTempFile::new().unwrap();
        writeln!(exhibition, "Date,Time,Home Team,Guest Team,Field").unwrap();
        writeln!(
            exhibition,
            "2025-09-20,10:00 AM,LSA U14BT3 Hart,Cowichan Valley,Braefoot Park"
        )
        .unwrap();

        let mut config = config_without_exhibition();
        config.exhibition.file = Some(exhibition.path().to_path_buf());

        let (document, summary) = build_document(&config, &sample_markup(), run_now());
        assert_eq!(summary.events, 3);
        assert!(
            document
                .contains("SUMMARY:Lakehill U14 Boys T3 vs Cowichan Valley (Exhibition)")
        );
    }

    #[test]
    fn missing_exhibition_file_is_not_an_error() {
        let mut config = config_without_exhibition();
        config.exhibition.file = Some(std::path::PathBuf::from("/nonexistent/exhibition.csv"));
        let (_, summary) = build_document(&config, &sample_markup(), run_now());
        assert_eq!(summary.events, 2);
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let config = config_without_exhibition();
        let markup = sample_markup();
        let first = build_document(&config, &markup, run_now()).0;
        let second = build_document(&config, &markup, run_now()).0;
        assert_eq!(first, second);
    }

    #[test]
    fn run_writes_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("schedule.html");
        std::fs::write(&input, sample_markup()).unwrap();
        let output = dir.path().join("games.ics");

        let config = config_without_exhibition();
        run(&config, Some(&input), Some(&output), run_now()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("BEGIN:VCALENDAR"));
        assert!(written.contains("BEGIN:VTIMEZONE"));
    }
}
