//! Core types: normalized events, display rendering, export

pub mod display;
pub mod event;
pub mod export;
pub mod time;
pub mod tracing;

pub use display::{DisplayError, EventWhen, format_in_zone, format_instant, parse_timezone};
pub use event::{
    Attendee, AttendeeStatus, NormalizedEvent, Organizer, PLACEHOLDER_SUMMARY, Recurrence,
};
pub use export::{compact_timestamp, download_file_name, google_calendar_url, single_event_ics};
pub use time::EventTime;
pub use self::tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
