//! Raw row to event conversion.
//!
//! This module turns each [`RawGameRow`] into zero or one
//! [`GameEvent`]: byes are filtered, the missing year is inferred from the
//! season configuration, 12-hour clock times are resolved against the target
//! time zone, and "TBD" kickoffs collapse into at most one all-day
//! placeholder per run.
//!
//! Per-row data-quality problems are values, not exceptions: every row maps
//! to a [`RowOutcome`], and [`normalize_rows`] aggregates the skipped ones so
//! a bad row never aborts the batch.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use matchday_core::GameEvent;

use crate::config::{ScheduleConfig, SeasonYears};
use crate::exhibition::ExhibitionRecord;
use crate::row::RawGameRow;

/// The schedule's marker for a slot with no opponent.
pub const NO_OPPONENT: &str = "--";

/// The schedule's marker for an unannounced kickoff time.
pub const TIME_TBD: &str = "TBD";

/// Per-run state threaded through one normalization pass.
///
/// Owns the run's reference instant and the placeholder budget; built fresh
/// for every run and discarded at its end.
#[derive(Debug)]
pub struct RunContext {
    now: DateTime<Utc>,
    placeholder_used: bool,
}

impl RunContext {
    /// Creates a context for a run happening at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            placeholder_used: false,
        }
    }

    /// The instant this run is anchored to.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn claim_placeholder(&mut self) -> bool {
        if self.placeholder_used {
            false
        } else {
            self.placeholder_used = true;
            true
        }
    }
}

/// Why a row produced no event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// One side has no opponent; a bye, not a game.
    Bye,
    /// Month abbreviation not in the fixed table.
    UnknownMonth(String),
    /// Day-of-month missing, unparseable, or not a real date.
    BadDay(String),
    /// Exhibition date not in `YYYY-MM-DD` form.
    BadDate(String),
    /// Clock time neither `H:MM AM/PM` nor a TBD marker.
    BadTime(String),
    /// This run already emitted its one placeholder.
    PlaceholderTaken,
    /// TBD game outside the forward-looking placeholder window.
    PlaceholderOutsideWindow,
}

impl SkipReason {
    /// Returns true for skips caused by unparseable data, as opposed to
    /// ordinary filtering.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownMonth(_) | Self::BadDay(_) | Self::BadDate(_) | Self::BadTime(_)
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bye => write!(f, "bye week"),
            Self::UnknownMonth(text) => write!(f, "unknown month in {text:?}"),
            Self::BadDay(text) => write!(f, "bad day in {text:?}"),
            Self::BadDate(text) => write!(f, "bad date {text:?}"),
            Self::BadTime(text) => write!(f, "bad time {text:?}"),
            Self::PlaceholderTaken => write!(f, "placeholder already emitted this run"),
            Self::PlaceholderOutsideWindow => write!(f, "TBD game outside placeholder window"),
        }
    }
}

/// The result of normalizing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The row became an event.
    Event(GameEvent),
    /// The row was dropped, with the reason.
    Skipped(SkipReason),
}

/// Aggregated result of a normalization pass.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Events in schedule order.
    pub events: Vec<GameEvent>,
    /// Skipped rows as (row index, reason).
    pub skips: Vec<(usize, SkipReason)>,
}

fn month_number(abbr: &str) -> Option<u32> {
    match abbr {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// Parses `"Sep 7 - Sunday"` style date text; only the month abbreviation
/// and day matter, the year comes from the season configuration.
fn parse_schedule_date(date_text: &str, season: &SeasonYears) -> Result<NaiveDate, SkipReason> {
    let prefix = date_text.split(" - ").next().unwrap_or(date_text).trim();
    let mut parts = prefix.split_whitespace();
    let month_str = parts.next().unwrap_or_default();
    let month =
        month_number(month_str).ok_or_else(|| SkipReason::UnknownMonth(date_text.to_string()))?;
    let day: u32 = parts
        .next()
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| SkipReason::BadDay(date_text.to_string()))?;
    let year = season.infer_year(month);
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SkipReason::BadDay(date_text.to_string()))
}

/// Parses a 12-hour clock time like `"6:30 PM"` into 24-hour (hour, minute).
///
/// `Ok(None)` means the time is a TBD marker (or empty) and the game has no
/// announced kickoff.
fn parse_clock(time_text: &str) -> Result<Option<(u32, u32)>, SkipReason> {
    let trimmed = time_text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(TIME_TBD) {
        return Ok(None);
    }
    let err = || SkipReason::BadTime(time_text.to_string());
    let (clock, meridiem) = trimmed.split_once(' ').ok_or_else(err)?;
    let (hour_str, minute_str) = clock.split_once(':').ok_or_else(err)?;
    let hour: u32 = hour_str.trim().parse().map_err(|_| err())?;
    let minute: u32 = minute_str.trim().parse().map_err(|_| err())?;
    if !(1..=12).contains(&hour) || minute >= 60 {
        return Err(err());
    }
    let hour24 = match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" => hour % 12,
        "PM" => hour % 12 + 12,
        _ => return Err(err()),
    };
    Ok(Some((hour24, minute)))
}

/// Substitutes roster shorthand codes with display names.
fn apply_aliases(text: &str, aliases: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (code, display) in aliases {
        if out.contains(code.as_str()) {
            out = out.replace(code.as_str(), display);
        }
    }
    out
}

struct RowText {
    home: String,
    away: String,
    location: String,
    description: String,
}

fn row_text(home: &str, away: &str, field: &str, config: &ScheduleConfig) -> RowText {
    let home = apply_aliases(home.trim(), &config.team_aliases);
    let away = apply_aliases(away.trim(), &config.team_aliases);
    let location = apply_aliases(field.trim(), &config.team_aliases);
    let description = format!("Home: {home}, Guest: {away}");
    RowText {
        home,
        away,
        location,
        description,
    }
}

fn timed_event(
    title: String,
    date: NaiveDate,
    hour: u32,
    minute: u32,
    text: RowText,
    config: &ScheduleConfig,
) -> GameEvent {
    let local = date.and_hms_opt(hour, minute, 0).expect("validated clock time");
    let start = config.timezone.to_utc(local);
    let end = start + Duration::minutes(config.rules.game_duration_minutes);
    GameEvent::timed(title, start, end, text.location, text.description)
}

/// Normalizes one schedule row into zero or one event.
pub fn normalize_row(
    row: &RawGameRow,
    config: &ScheduleConfig,
    ctx: &mut RunContext,
) -> RowOutcome {
    if row.home_team.trim() == NO_OPPONENT || row.away_team.trim() == NO_OPPONENT {
        return RowOutcome::Skipped(SkipReason::Bye);
    }
    let date = match parse_schedule_date(&row.date_text, &config.season) {
        Ok(date) => date,
        Err(reason) => return RowOutcome::Skipped(reason),
    };
    let clock = match parse_clock(&row.time_text) {
        Ok(clock) => clock,
        Err(reason) => return RowOutcome::Skipped(reason),
    };
    let text = row_text(&row.home_team, &row.away_team, &row.field_name, config);
    match clock {
        Some((hour, minute)) => {
            let title = format!("{} vs {}", text.home, text.away);
            RowOutcome::Event(timed_event(title, date, hour, minute, text, config))
        }
        None => {
            // Placeholders are limited to imminent, unscheduled games: one
            // per run, and only within the forward-looking window.
            let today = config.timezone.to_local(ctx.now()).date();
            let days_out = (date - today).num_days();
            if days_out < 0 || days_out > config.rules.placeholder_lookahead_days {
                return RowOutcome::Skipped(SkipReason::PlaceholderOutsideWindow);
            }
            if !ctx.claim_placeholder() {
                return RowOutcome::Skipped(SkipReason::PlaceholderTaken);
            }
            let title = format!("{} vs {} (TBD)", text.home, text.away);
            RowOutcome::Event(GameEvent::placeholder(
                title,
                date,
                text.location,
                text.description,
            ))
        }
    }
}

/// Normalizes a batch of rows, logging and aggregating skips.
pub fn normalize_rows(
    rows: &[RawGameRow],
    config: &ScheduleConfig,
    ctx: &mut RunContext,
) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, config, ctx) {
            RowOutcome::Event(event) => report.events.push(event),
            RowOutcome::Skipped(reason) => {
                if reason.is_data_error() {
                    warn!(
                        index,
                        home = %row.home_team,
                        away = %row.away_team,
                        %reason,
                        "skipping unparseable schedule row"
                    );
                } else {
                    debug!(index, home = %row.home_team, away = %row.away_team, %reason, "skipping schedule row");
                }
                report.skips.push((index, reason));
            }
        }
    }
    report
}

/// Normalizes one manually supplied exhibition record.
///
/// Exhibition rows carry a full `YYYY-MM-DD` date, are tagged
/// `(Exhibition)` in the title, and form their own placeholder pool: they
/// are never bye-filtered and never count against the primary run's
/// placeholder budget.
pub fn normalize_exhibition_row(record: &ExhibitionRecord, config: &ScheduleConfig) -> RowOutcome {
    let date = match NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return RowOutcome::Skipped(SkipReason::BadDate(record.date.clone())),
    };
    let clock = match parse_clock(&record.time) {
        Ok(clock) => clock,
        Err(reason) => return RowOutcome::Skipped(reason),
    };
    let text = row_text(&record.home_team, &record.guest_team, &record.field, config);
    let title = format!("{} vs {} (Exhibition)", text.home, text.away);
    match clock {
        Some((hour, minute)) => {
            RowOutcome::Event(timed_event(title, date, hour, minute, text, config))
        }
        None => RowOutcome::Event(GameEvent::placeholder(
            format!("{title} (TBD)"),
            date,
            text.location,
            text.description,
        )),
    }
}

/// Normalizes a batch of exhibition records.
pub fn normalize_exhibition_rows(
    records: &[ExhibitionRecord],
    config: &ScheduleConfig,
) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    for (index, record) in records.iter().enumerate() {
        match normalize_exhibition_row(record, config) {
            RowOutcome::Event(event) => report.events.push(event),
            RowOutcome::Skipped(reason) => {
                warn!(index, %reason, "skipping exhibition record");
                report.skips.push((index, reason));
            }
        }
    }
    report
}
