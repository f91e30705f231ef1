//! Row extraction from the embedded schedule markup.
//!
//! The league site returns its schedule as an HTML fragment inside a JSON
//! envelope. Each game is a `div.Schedule_Row` with labeled sub-elements for
//! date, time, teams, and field. [`ScheduleRowAccessor`] adapts that shape to
//! the [`RowAccessor`] seam; [`extract_rows`] walks the fragment in document
//! order, which is also schedule order.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::normalize::NO_OPPONENT;
use crate::row::{RawGameRow, RowAccessor};

struct Selectors {
    row: Selector,
    date: Selector,
    date_label: Selector,
    home: Selector,
    away: Selector,
    field: Selector,
    home_outer: Selector,
    away_outer: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        let parse = |s: &str| Selector::parse(s).expect("valid selector");
        Selectors {
            row: parse("div.Schedule_Row"),
            date: parse("div.Schedule_Date"),
            date_label: parse("div.Schedule_Date > b"),
            home: parse("div.Schedule_Home_Text"),
            away: parse("div.Schedule_Away_Text"),
            field: parse("div.Schedule_Field_Text"),
            home_outer: parse("div.Schedule_HomeOuter"),
            away_outer: parse("div.Schedule_AwayOuter"),
        }
    })
}

fn team_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"PAGE_LoadTeam\((\d+)\)").expect("valid regex"))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// [`RowAccessor`] implementation over one `div.Schedule_Row` element.
pub struct ScheduleRowAccessor<'a> {
    row: ElementRef<'a>,
}

impl<'a> ScheduleRowAccessor<'a> {
    /// Wraps a row element.
    pub fn new(row: ElementRef<'a>) -> Self {
        Self { row }
    }

    fn select_text(&self, selector: &Selector) -> Option<String> {
        self.row.select(selector).next().map(text_of)
    }
}

impl RowAccessor for ScheduleRowAccessor<'_> {
    fn date_text(&self) -> Option<String> {
        self.select_text(&selectors().date_label)
    }

    /// The time lives in the div immediately following the date div.
    fn time_text(&self) -> Option<String> {
        let date_el = self.row.select(&selectors().date).next()?;
        date_el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "div")
            .map(text_of)
    }

    fn home_team(&self) -> Option<String> {
        self.select_text(&selectors().home)
    }

    fn away_team(&self) -> Option<String> {
        self.select_text(&selectors().away)
    }

    fn field_name(&self) -> Option<String> {
        self.select_text(&selectors().field)
    }
}

/// Extracts raw schedule rows from a markup fragment, in document order.
///
/// Rows missing their date sub-element are dropped; nothing here aborts
/// extraction of subsequent rows.
pub fn extract_rows(markup: &str) -> Vec<RawGameRow> {
    let document = Html::parse_fragment(markup);
    let rows: Vec<RawGameRow> = document
        .select(&selectors().row)
        .filter_map(|el| RawGameRow::from_accessor(&ScheduleRowAccessor::new(el)))
        .collect();
    debug!(count = rows.len(), "extracted schedule rows");
    rows
}

/// A team discovered in the schedule markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    /// Team name as published.
    pub name: String,
    /// The site's numeric team id, taken from the row's onclick handler.
    pub id: String,
}

/// Collects (name, id) pairs for every team referenced by the fragment.
///
/// The site wires each team cell to `PAGE_LoadTeam(<id>)`; the id is pulled
/// from that handler. Bye markers and duplicate ids are skipped. Order
/// follows first appearance in the document.
pub fn discover_teams(markup: &str) -> Vec<TeamRef> {
    let document = Html::parse_fragment(markup);
    let sel = selectors();
    let mut seen = HashSet::new();
    let mut teams = Vec::new();

    for row in document.select(&sel.row) {
        for (outer, text) in [(&sel.home_outer, &sel.home), (&sel.away_outer, &sel.away)] {
            let Some(outer_el) = row.select(outer).next() else {
                continue;
            };
            let Some(onclick) = outer_el.value().attr("onclick") else {
                continue;
            };
            let Some(caps) = team_id_regex().captures(onclick) else {
                continue;
            };
            let Some(name) = row.select(text).next().map(text_of) else {
                continue;
            };
            if name.is_empty() || name == NO_OPPONENT {
                continue;
            }
            let id = caps[1].to_string();
            if seen.insert(id.clone()) {
                teams.push(TeamRef { name, id });
            }
        }
    }

    debug!(count = teams.len(), "discovered teams");
    teams
}
