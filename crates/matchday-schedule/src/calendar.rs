//! Calendar document emission.
//!
//! Serializes the ordered event sequence into one self-contained iCalendar
//! document: document-level metadata set once, a VTIMEZONE carrying the
//! season's two daylight-saving transitions, and one VEVENT per game. Timed
//! games are written as local wall-clock times with a `TZID` reference;
//! placeholder games as date-only values.
//!
//! Output is deterministic: DTSTAMPs are pinned to the run's reference
//! instant and UIDs derive from event content, so identical inputs
//! regenerate a byte-identical document.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike, Property};
use serde::{Deserialize, Serialize};
use tracing::debug;

use matchday_core::{EventTime, GameEvent, TimezoneSpec};

/// Document-level calendar metadata, set once per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarMeta {
    /// Product identifier written as PRODID.
    pub prodid: String,
    /// Calendar display name.
    pub name: String,
    /// Calendar description.
    pub description: String,
}

impl Default for CalendarMeta {
    fn default() -> Self {
        Self {
            prodid: "-//Lakehill SA//matchday//EN".to_string(),
            name: "Lakehill Game Schedule".to_string(),
            description: "League and exhibition games".to_string(),
        }
    }
}

/// Serializes events into a complete iCalendar document.
///
/// `now` pins every DTSTAMP so regeneration from identical inputs is
/// byte-identical.
pub fn build_calendar(
    events: &[GameEvent],
    meta: &CalendarMeta,
    tz: &TimezoneSpec,
    now: DateTime<Utc>,
) -> String {
    let mut calendar = Calendar::new();
    calendar
        .name(&meta.name)
        .description(&meta.description)
        .timezone(&tz.tzid)
        .append_property(Property::new("PRODID", &meta.prodid));

    for event in events {
        calendar.push(to_component(event, tz, now));
    }

    let serialized = calendar.done().to_string();
    debug!(events = events.len(), "serialized calendar document");
    insert_vtimezone(&serialized, &vtimezone_block(tz))
}

fn to_component(event: &GameEvent, tz: &TimezoneSpec, now: DateTime<Utc>) -> Event {
    let mut component = Event::new();
    component
        .uid(&event.uid())
        .summary(&event.title)
        .timestamp(now);
    if !event.location.is_empty() {
        component.location(&event.location);
    }
    if !event.description.is_empty() {
        component.description(&event.description);
    }
    match &event.start {
        EventTime::AllDay(date) => {
            component.starts(*date);
        }
        EventTime::DateTime(start) => {
            component.starts(with_tzid(*start, tz));
            if let Some(end) = event.end {
                component.ends(with_tzid(end, tz));
            }
        }
    }
    component.done()
}

fn with_tzid(instant: DateTime<Utc>, tz: &TimezoneSpec) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time: tz.to_local(instant),
        tzid: tz.tzid.clone(),
    }
}

fn vtimezone_block(tz: &TimezoneSpec) -> String {
    let fmt = "%Y%m%dT%H%M%S";
    let lines = [
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{}", tz.tzid),
        "BEGIN:DAYLIGHT".to_string(),
        format!("DTSTART:{}", tz.daylight_start.format(fmt)),
        format!("TZOFFSETFROM:{}", tz.standard_offset.ics()),
        format!("TZOFFSETTO:{}", tz.daylight_offset.ics()),
        "END:DAYLIGHT".to_string(),
        "BEGIN:STANDARD".to_string(),
        format!("DTSTART:{}", tz.daylight_end.format(fmt)),
        format!("TZOFFSETFROM:{}", tz.daylight_offset.ics()),
        format!("TZOFFSETTO:{}", tz.standard_offset.ics()),
        "END:STANDARD".to_string(),
        "END:VTIMEZONE".to_string(),
    ];
    let mut block = lines.join("\r\n");
    block.push_str("\r\n");
    block
}

// The timezone declaration goes ahead of the first event component.
fn insert_vtimezone(document: &str, block: &str) -> String {
    let at = document
        .find("BEGIN:VEVENT")
        .or_else(|| document.find("END:VCALENDAR"))
        .unwrap_or(document.len());
    let mut out = String::with_capacity(document.len() + block.len());
    out.push_str(&document[..at]);
    out.push_str(block);
    out.push_str(&document[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use icalendar::{CalendarComponent, DatePerhapsTime};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pacific() -> TimezoneSpec {
        TimezoneSpec {
            tzid: "America/Vancouver".to_string(),
            standard_offset: "-08:00".parse().unwrap(),
            daylight_offset: "-07:00".parse().unwrap(),
            daylight_start: date(2026, 3, 8).and_hms_opt(2, 0, 0).unwrap(),
            daylight_end: date(2025, 11, 2).and_hms_opt(2, 0, 0).unwrap(),
        }
    }

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::timed(
                "Lakehill U14 Boys T3 vs Victoria FC",
                utc(2025, 9, 8, 1, 30, 0),
                utc(2025, 9, 8, 3, 30, 0),
                "Royal Athletic Park",
                "Home: Lakehill U14 Boys T3, Guest: Victoria FC",
            ),
            GameEvent::placeholder(
                "Bays United vs Lakehill U14 Boys T3 (TBD)",
                date(2025, 9, 14),
                "",
                "Home: Bays United, Guest: Lakehill U14 Boys T3",
            ),
        ]
    }

    fn run_now() -> DateTime<Utc> {
        utc(2025, 9, 5, 19, 0, 0)
    }

    #[test]
    fn document_carries_metadata_and_timezone() {
        let ics = build_calendar(&sample_events(), &CalendarMeta::default(), &pacific(), run_now());
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.contains("PRODID:-//Lakehill SA//matchday//EN"));
        assert!(ics.contains("X-WR-CALNAME:Lakehill Game Schedule"));
        assert!(ics.contains("X-WR-TIMEZONE:America/Vancouver"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn vtimezone_declares_both_transitions() {
        let ics = build_calendar(&sample_events(), &CalendarMeta::default(), &pacific(), run_now());
        assert_eq!(ics.matches("BEGIN:VTIMEZONE").count(), 1);
        assert!(ics.contains("TZID:America/Vancouver"));
        let daylight_at = ics.find("BEGIN:DAYLIGHT").unwrap();
        let standard_at = ics.find("BEGIN:STANDARD").unwrap();
        assert!(ics[daylight_at..].contains("DTSTART:20260308T020000"));
        assert!(ics[standard_at..].contains("DTSTART:20251102T020000"));
        // The declaration precedes the first event.
        assert!(daylight_at < ics.find("BEGIN:VEVENT").unwrap());
    }

    #[test]
    fn timed_event_uses_local_time_with_tzid() {
        let ics = build_calendar(&sample_events(), &CalendarMeta::default(), &pacific(), run_now());
        assert!(ics.contains("DTSTART;TZID=America/Vancouver:20250907T183000"));
        assert!(ics.contains("DTEND;TZID=America/Vancouver:20250907T203000"));
    }

    #[test]
    fn placeholder_is_date_only_without_end() {
        let ics = build_calendar(&sample_events(), &CalendarMeta::default(), &pacific(), run_now());
        assert!(ics.contains("DTSTART;VALUE=DATE:20250914"));
        assert!(ics.contains("UID:20250914-bays-united-vs-lakehill-u14-boys-t3-tbd@matchday"));
        // Only the timed event carries an end.
        assert_eq!(ics.matches("DTEND").count(), 1);
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let events = sample_events();
        let first = build_calendar(&events, &CalendarMeta::default(), &pacific(), run_now());
        let second = build_calendar(&events, &CalendarMeta::default(), &pacific(), run_now());
        assert_eq!(first, second);
    }

    #[test]
    fn round_trips_through_a_conformant_parser() {
        let ics = build_calendar(&sample_events(), &CalendarMeta::default(), &pacific(), run_now());
        let parsed: Calendar = ics.parse().unwrap();

        let events: Vec<_> = parsed
            .iter()
            .filter_map(|component| match component {
                CalendarComponent::Event(event) => Some(event),
                _ => None,
            })
            .collect();
        assert_eq!(events.len(), 2);

        let timed = events
            .iter()
            .find(|e| e.get_summary() == Some("Lakehill U14 Boys T3 vs Victoria FC"))
            .expect("timed event present");
        assert_eq!(timed.get_location(), Some("Royal Athletic Park"));
        assert_eq!(
            timed.get_description(),
            Some("Home: Lakehill U14 Boys T3, Guest: Victoria FC")
        );
        match timed.get_start().expect("start present") {
            DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
                assert_eq!(tzid, "America/Vancouver");
                assert_eq!(date_time, date(2025, 9, 7).and_hms_opt(18, 30, 0).unwrap());
            }
            other => panic!("expected zoned datetime, got {other:?}"),
        }
        match timed.get_end().expect("end present") {
            DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
                assert_eq!(date_time, date(2025, 9, 7).and_hms_opt(20, 30, 0).unwrap());
            }
            other => panic!("expected zoned datetime, got {other:?}"),
        }

        let placeholder = events
            .iter()
            .find(|e| {
                e.get_summary() == Some("Bays United vs Lakehill U14 Boys T3 (TBD)")
            })
            .expect("placeholder present");
        match placeholder.get_start().expect("start present") {
            DatePerhapsTime::Date(d) => assert_eq!(d, date(2025, 9, 14)),
            other => panic!("expected date, got {other:?}"),
        }
    }

    #[test]
    fn empty_event_list_still_produces_a_valid_document() {
        let ics = build_calendar(&[], &CalendarMeta::default(), &pacific(), run_now());
        assert!(ics.contains("BEGIN:VTIMEZONE"));
        assert!(!ics.contains("BEGIN:VEVENT"));
        let parsed: Calendar = ics.parse().unwrap();
        assert!(
            !parsed
                .iter()
                .any(|c| matches!(c, CalendarComponent::Event(_)))
        );
    }
}
