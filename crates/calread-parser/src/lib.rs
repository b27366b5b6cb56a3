//! Calendar file decoders and event normalization.
//!
//! This crate turns the text of an iCalendar (`.ics`), vCalendar (`.vcs`) or
//! CSV (`.csv`) file into a list of [`NormalizedEvent`]s:
//!
//! - [`detect_format`] - Picks a decoder from the file extension
//! - [`ics`] - Component-tree decoding, including recurrence rules
//! - [`recurrence`] - Rule translation and descriptions
//! - [`tabular`] - CSV decoding with column aliases
//! - [`EventNormalizer`] - Defaults shared by every decoder
//!
//! # Architecture
//!
//! ```text
//!          file name              file text
//!              │                      │
//!              ▼                      │
//!      ┌───────────────┐              │
//!      │ detect_format │              │
//!      └───────┬───────┘              │
//!              │                      │
//!       ┌──────┴──────────────┐       │
//!       ▼                     ▼       ▼
//! ┌────────────┐       ┌─────────────┐
//! │ decode_ics │──┐    │ decode_csv  │
//! └────────────┘  │    └──────┬──────┘
//!       recurrence_for        │
//!                 │           │
//!                 ▼           ▼
//!              ┌─────────────────┐
//!              │    RawEvent     │
//!              └────────┬────────┘
//!                       ▼ EventNormalizer
//!              ┌─────────────────┐
//!              │ NormalizedEvent │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use calread_parser::parse_calendar;
//!
//! let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:e1\r\n\
//!            DTSTART;VALUE=DATE:20240101\r\nDTEND;VALUE=DATE:20240102\r\n\
//!            SUMMARY:Trip\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let events = parse_calendar(ics, "trip.ics").unwrap();
//! assert_eq!(events[0].summary(), "Trip");
//! assert!(events[0].is_all_day());
//! ```

pub mod error;
pub mod format;
pub mod ics;
pub mod normalize;
pub mod options;
pub mod raw_event;
pub mod recurrence;
pub mod tabular;
mod zone;

use std::path::Path;

use calread_core::NormalizedEvent;
use tracing::{debug, instrument};

// Re-export main types at crate root
pub use error::{ParseError, ParseResult};
pub use format::{FileFormat, detect_format};
pub use normalize::EventNormalizer;
pub use options::ParseOptions;
pub use raw_event::{RawAttendee, RawEvent, RawOrganizer};
pub use recurrence::RecurrenceError;

/// Parses calendar text with default options.
///
/// `file_name` is only used to pick the decoder.
pub fn parse_calendar(text: &str, file_name: &str) -> ParseResult<Vec<NormalizedEvent>> {
    parse_calendar_with(text, file_name, &ParseOptions::default())
}

/// Parses calendar text.
///
/// Either every event in the file is returned, in file order, or the first
/// file-level error.
#[instrument(level = "debug", skip(text, options), fields(len = text.len()))]
pub fn parse_calendar_with(
    text: &str,
    file_name: &str,
    options: &ParseOptions,
) -> ParseResult<Vec<NormalizedEvent>> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let format = detect_format(file_name)?;
    let raw_events = match format {
        FileFormat::Ics => ics::decode_ics(text)?,
        FileFormat::Csv => tabular::decode_csv(text, options)?,
    };

    let events = EventNormalizer::new(format, text).normalize_all(raw_events);
    debug!(%format, count = events.len(), "Parsed calendar file");
    Ok(events)
}

/// Reads a calendar file from disk and parses it.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub async fn read_calendar_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> ParseResult<Vec<NormalizedEvent>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    parse_calendar_with(&text, &file_name, options)
}
