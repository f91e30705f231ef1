//! Schedule pipeline: fetch, row extraction, normalization, calendar emission.
//!
//! The pipeline is three stages, each depending only on the previous
//! stage's output:
//!
//! ```text
//! ┌──────────────────┐
//! │ schedule endpoint │  (JSON envelope around an HTML fragment)
//! └────────┬─────────┘
//!          ▼ ScheduleFetcher::fetch_markup()
//! ┌──────────────────┐
//! │  markup fragment  │
//! └────────┬─────────┘
//!          ▼ extract_rows()
//! ┌──────────────────┐       ┌────────────────────┐
//! │   RawGameRow…     │       │ ExhibitionRecord…  │ (optional CSV)
//! └────────┬─────────┘       └─────────┬──────────┘
//!          ▼ normalize_rows()          ▼ normalize_exhibition_rows()
//! ┌─────────────────────────────────────────────┐
//! │                 GameEvent…                   │
//! └────────────────────┬────────────────────────┘
//!                      ▼ build_calendar()
//!              iCalendar document
//! ```
//!
//! Row-level data problems are recovered as [`SkipReason`] values; only
//! whole-input unavailability is a [`ScheduleError`].

pub mod calendar;
pub mod config;
pub mod error;
pub mod exhibition;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod row;

pub use calendar::{CalendarMeta, build_calendar};
pub use config::{NormalizeRules, ScheduleConfig, SeasonYears};
pub use error::{ScheduleError, ScheduleErrorCode, ScheduleResult};
pub use exhibition::{ExhibitionRecord, load_exhibition};
pub use extract::{ScheduleRowAccessor, TeamRef, discover_teams, extract_rows};
pub use fetch::{FetchConfig, ScheduleFetcher};
pub use normalize::{
    NO_OPPONENT, NormalizeReport, RowOutcome, RunContext, SkipReason, TIME_TBD,
    normalize_exhibition_row, normalize_exhibition_rows, normalize_row, normalize_rows,
};
pub use row::{RawGameRow, RowAccessor};
