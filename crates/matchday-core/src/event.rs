//! Event types for schedule entries.
//!
//! This module provides [`GameEvent`], the fully resolved representation of
//! one schedule entry after normalization. A game is either timed (start and
//! end instants) or an all-day placeholder standing in for a game whose
//! kickoff time has not been announced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// A fully resolved game event.
///
/// Created by the normalizer from exactly one raw schedule row (or one
/// exhibition record); never mutated after creation.
///
/// Invariant: when `is_placeholder` is true, `start` is an all-day date and
/// `end` is absent. The constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Human-readable summary, e.g. `"Lakehill U14 Boys vs Victoria FC"`.
    pub title: String,
    /// When the game starts.
    pub start: EventTime,
    /// When the game ends. Absent for all-day placeholder events.
    pub end: Option<DateTime<Utc>>,
    /// The field the game is played on; empty when no field is assigned.
    pub location: String,
    /// Description naming both sides.
    pub description: String,
    /// Whether this is a stand-in for a game with no announced kickoff.
    pub is_placeholder: bool,
}

impl GameEvent {
    /// Creates a timed game event.
    pub fn timed(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start: EventTime::from_utc(start),
            end: Some(end),
            location: location.into(),
            description: description.into(),
            is_placeholder: false,
        }
    }

    /// Creates an all-day placeholder event for an unannounced kickoff.
    pub fn placeholder(
        title: impl Into<String>,
        date: NaiveDate,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start: EventTime::from_date(date),
            end: None,
            location: location.into(),
            description: description.into(),
            is_placeholder: true,
        }
    }

    /// Returns `true` if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Returns the duration in minutes, or `None` for all-day events.
    pub fn duration_minutes(&self) -> Option<i64> {
        let start = self.start.as_datetime()?;
        let end = self.end?;
        Some((end - *start).num_minutes())
    }

    /// A stable identifier for this event, derived from its date and title.
    ///
    /// Identical inputs yield identical identifiers, which keeps regenerated
    /// calendar documents byte-identical.
    pub fn uid(&self) -> String {
        format!(
            "{}-{}@matchday",
            self.start.date().format("%Y%m%d"),
            slug(&self.title)
        )
    }
}

/// Lowercases and collapses non-alphanumeric runs to single dashes.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dash_pending = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if dash_pending && !out.is_empty() {
                out.push('-');
            }
            dash_pending = false;
            out.push(c.to_ascii_lowercase());
        } else {
            dash_pending = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timed_event() {
        let event = GameEvent::timed(
            "Lakehill U14 Boys vs Victoria FC",
            utc(2025, 9, 8, 1, 30, 0),
            utc(2025, 9, 8, 3, 30, 0),
            "Royal Athletic Park",
            "Home: Lakehill U14 Boys, Guest: Victoria FC",
        );
        assert!(!event.is_placeholder);
        assert!(!event.is_all_day());
        assert_eq!(event.duration_minutes(), Some(120));
        assert_eq!(event.end, Some(utc(2025, 9, 8, 3, 30, 0)));
    }

    #[test]
    fn placeholder_event_is_all_day_without_end() {
        let event = GameEvent::placeholder(
            "Lakehill U14 Boys vs Victoria FC (TBD)",
            date(2025, 9, 7),
            "",
            "Home: Lakehill U14 Boys, Guest: Victoria FC",
        );
        assert!(event.is_placeholder);
        assert!(event.is_all_day());
        assert!(event.end.is_none());
        assert_eq!(event.duration_minutes(), None);
    }

    #[test]
    fn uid_is_stable_and_readable() {
        let event = GameEvent::placeholder(
            "Lakehill U14 Boys vs Victoria FC (TBD)",
            date(2025, 9, 7),
            "",
            "",
        );
        assert_eq!(
            event.uid(),
            "20250907-lakehill-u14-boys-vs-victoria-fc-tbd@matchday"
        );
        // Same inputs, same uid.
        let again = event.clone();
        assert_eq!(event.uid(), again.uid());
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("A -- B!! C"), "a-b-c");
        assert_eq!(slug("  leading"), "leading");
    }

    #[test]
    fn serde_roundtrip() {
        let event = GameEvent::timed(
            "A vs B",
            utc(2025, 9, 8, 1, 30, 0),
            utc(2025, 9, 8, 3, 30, 0),
            "Park",
            "Home: A, Guest: B",
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
