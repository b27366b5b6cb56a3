//! Recurrence rule translation.
//!
//! An event's `RRULE` value is parsed into a [`RecurRule`], rebuilt with the
//! `rrule` crate and validated against the event start, then described in
//! words. Any failure along the way is local to the event: the caller keeps
//! the raw rule text through [`Recurrence::Raw`].
//!
//! ```rust
//! use calread_parser::recurrence::recurrence_for;
//! use chrono::{TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let recurrence = recurrence_for("FREQ=WEEKLY;BYDAY=MO", start);
//! assert_eq!(recurrence.text(), "every week on Monday");
//! ```

mod rule;
mod text;
mod translate;

use calread_core::Recurrence;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

pub use rule::{Frequency, RecurRule, Until, WeekdayNum, WeekdayToken, strip_rrule_prefix};
pub use text::describe;
pub use translate::{map_frequency, map_weekday, to_rrule};

/// Why a rule could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("rule has no FREQ part")]
    MissingFrequency,

    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("unsupported UNTIL value: {0}")]
    UnsupportedUntil(String),

    #[error("invalid {part} value: {value}")]
    InvalidValue { part: &'static str, value: String },

    #[error("unknown rule part: {0}")]
    UnknownPart(String),

    #[error("malformed rule part: {0}")]
    MalformedPart(String),

    /// The rule builder refused the rule.
    #[error("rule rejected: {0}")]
    Rejected(String),
}

/// Translates raw `RRULE` tokens into a description.
///
/// `start` is the event's first occurrence; the rule is validated against it.
pub fn describe_rule(raw: &str, start: DateTime<Utc>) -> Result<String, RecurrenceError> {
    let rule: RecurRule = raw.parse()?;
    to_rrule(&rule, start)?;
    Ok(describe(&rule))
}

/// Translates a rule, falling back to the raw text on failure.
pub fn recurrence_for(raw: &str, start: DateTime<Utc>) -> Recurrence {
    match describe_rule(raw, start) {
        Ok(text) => Recurrence::Described(text),
        Err(error) => {
            let raw = strip_rrule_prefix(raw.trim());
            warn!(%error, rule = raw, "Keeping untranslated recurrence rule");
            Recurrence::Raw(raw.to_string())
        }
    }
}
