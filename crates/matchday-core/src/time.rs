//! Time types for schedule events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific instant or an all-day date), [`UtcOffset`]
//! for `±HH:MM` offsets, and [`TimezoneSpec`] describing the target zone with
//! its two daylight-saving transitions for the covered season.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing time configuration values.
#[derive(Debug, Error)]
pub enum TimeError {
    /// The offset string was not of the form `±HH:MM` or `±HHMM`.
    #[error("invalid UTC offset {0:?}, expected ±HH:MM")]
    InvalidOffset(String),
}

/// Represents the time of a schedule event.
///
/// Events can have two kinds of times:
/// - **DateTime**: a specific point in time (stored as UTC)
/// - **AllDay**: a date without a specific time (placeholder events)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A specific datetime, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime` from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Returns `true` if this is a specific datetime.
    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// Returns the datetime if this is a `DateTime` variant.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::AllDay(_) => None,
        }
    }

    /// Returns the date if this is an `AllDay` variant.
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Self::AllDay(d) => Some(d),
            Self::DateTime(_) => None,
        }
    }

    /// Converts to a UTC datetime for comparison purposes.
    ///
    /// For all-day events, returns midnight UTC on that date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_hms_opt(0, 0, 0).expect("valid time").and_utc(),
        }
    }

    /// Returns the date portion of this event time.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateTime(dt) => dt.date_naive(),
            Self::AllDay(date) => *date,
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc_datetime().cmp(&other.to_utc_datetime())
    }
}

/// A UTC offset such as `-08:00`.
///
/// Thin wrapper over [`FixedOffset`] with the two renderings the pipeline
/// needs: `±HH:MM` for configuration files and `±HHMM` for iCalendar
/// `TZOFFSETFROM`/`TZOFFSETTO` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(FixedOffset);

impl UtcOffset {
    /// Creates an offset from a number of seconds east of UTC.
    pub fn from_secs(secs: i32) -> Option<Self> {
        FixedOffset::east_opt(secs).map(Self)
    }

    /// Returns the wrapped [`FixedOffset`].
    pub fn fixed(&self) -> FixedOffset {
        self.0
    }

    /// Offset in seconds east of UTC.
    pub fn seconds(&self) -> i32 {
        self.0.local_minus_utc()
    }

    /// Renders in the iCalendar `±HHMM` form, e.g. `-0800`.
    pub fn ics(&self) -> String {
        let secs = self.seconds();
        let sign = if secs < 0 { '-' } else { '+' };
        let abs = secs.abs();
        format!("{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}

impl FromStr for UtcOffset {
    type Err = TimeError;

    /// Accepts `±HH:MM` or `±HHMM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeError::InvalidOffset(s.to_string());
        let (sign, rest) = match s.bytes().next() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(err()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| err())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| err())?;
        if minutes >= 60 {
            return Err(err());
        }
        Self::from_secs(sign * (hours * 3600 + minutes * 60)).ok_or_else(err)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.seconds();
        let sign = if secs < 0 { '-' } else { '+' };
        let abs = secs.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}

impl Serialize for UtcOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The target time zone for a season, with its two daylight-saving
/// transitions supplied as configuration rather than looked up from a
/// timezone database.
///
/// `daylight_start` and `daylight_end` are local wall-clock instants: the
/// moment the clock springs forward and the moment it falls back. For a
/// season spanning a calendar-year boundary the fall-back instant precedes
/// the spring-forward instant; both orderings are handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneSpec {
    /// IANA identifier, e.g. `America/Vancouver`.
    pub tzid: String,
    /// Offset in effect outside daylight saving.
    pub standard_offset: UtcOffset,
    /// Offset in effect during daylight saving.
    pub daylight_offset: UtcOffset,
    /// Local wall-clock instant when daylight saving begins.
    pub daylight_start: NaiveDateTime,
    /// Local wall-clock instant when daylight saving ends.
    pub daylight_end: NaiveDateTime,
}

impl TimezoneSpec {
    /// Returns `true` if daylight saving is in effect at the given local
    /// wall-clock time.
    pub fn is_daylight_local(&self, local: NaiveDateTime) -> bool {
        if self.daylight_start <= self.daylight_end {
            local >= self.daylight_start && local < self.daylight_end
        } else {
            // Season crosses a calendar-year boundary: daylight saving is in
            // effect before the fall-back and again after the spring-forward.
            local < self.daylight_end || local >= self.daylight_start
        }
    }

    /// The offset in effect at the given local wall-clock time.
    pub fn offset_at_local(&self, local: NaiveDateTime) -> FixedOffset {
        if self.is_daylight_local(local) {
            self.daylight_offset.fixed()
        } else {
            self.standard_offset.fixed()
        }
    }

    /// Converts a local wall-clock time to UTC.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let offset = self.offset_at_local(local);
        (local - offset).and_utc()
    }

    /// Converts a UTC instant back to local wall-clock time.
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        let start_utc = self.to_utc_transition(self.daylight_start, self.standard_offset);
        let end_utc = self.to_utc_transition(self.daylight_end, self.daylight_offset);
        let daylight = if start_utc <= end_utc {
            utc >= start_utc && utc < end_utc
        } else {
            utc < end_utc || utc >= start_utc
        };
        let offset = if daylight {
            self.daylight_offset.fixed()
        } else {
            self.standard_offset.fixed()
        };
        utc.naive_utc() + offset
    }

    // A transition instant is expressed in the offset in effect before it.
    fn to_utc_transition(&self, local: NaiveDateTime, before: UtcOffset) -> DateTime<Utc> {
        (local - before.fixed()).and_utc()
    }
}
