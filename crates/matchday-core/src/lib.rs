//! Core types: game events, event time, timezone handling, tracing setup

pub mod event;
pub mod time;
pub mod tracing;

pub use event::GameEvent;
pub use time::{EventTime, TimeError, TimezoneSpec, UtcOffset};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
