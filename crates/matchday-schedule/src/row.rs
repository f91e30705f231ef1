//! Raw schedule rows and the accessor seam over markup.
//!
//! [`RowAccessor`] hides the markup shape from the rest of the pipeline:
//! each getter returns `Option<String>` and a missing sub-element never
//! aborts extraction. [`RawGameRow`] is the positional, untyped field-set one
//! row yields before normalization.

use serde::{Deserialize, Serialize};

/// One schedule row as published, before any parsing.
///
/// No identity beyond its position in the extracted sequence. An empty
/// `field_name` stands for "no field assigned".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGameRow {
    /// Date text, e.g. `"Sep 7 - Sunday"`.
    pub date_text: String,
    /// Time text: a clock time like `"6:30 PM"`, `"TBD"`, or empty.
    pub time_text: String,
    /// Home team text as published.
    pub home_team: String,
    /// Away team text as published.
    pub away_team: String,
    /// Field name, empty when none is assigned.
    pub field_name: String,
}

/// Capability interface over one markup row.
///
/// Implementations differ by markup shape; the normalizer never touches
/// markup directly.
pub trait RowAccessor {
    /// The row's date text, if the date sub-element exists.
    fn date_text(&self) -> Option<String>;
    /// The row's time text, if present.
    fn time_text(&self) -> Option<String>;
    /// The home team text, if present.
    fn home_team(&self) -> Option<String>;
    /// The away team text, if present.
    fn away_team(&self) -> Option<String>;
    /// The field name, if present.
    fn field_name(&self) -> Option<String>;
}

impl RawGameRow {
    /// Builds a row from an accessor.
    ///
    /// A row without a date sub-element is malformed and yields `None`;
    /// every other missing sub-element downgrades to an empty string.
    pub fn from_accessor(accessor: &impl RowAccessor) -> Option<Self> {
        let date_text = accessor.date_text()?;
        Some(Self {
            date_text,
            time_text: accessor.time_text().unwrap_or_default(),
            home_team: accessor.home_team().unwrap_or_default(),
            away_team: accessor.away_team().unwrap_or_default(),
            field_name: accessor.field_name().unwrap_or_default(),
        })
    }
}
