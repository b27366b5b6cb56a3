//! Time values read from calendar sources.
//!
//! [`EventTime`] keeps the distinction a source makes between a specific
//! instant and a bare calendar date until the event is normalized.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Represents the start or end of an event as read from a source.
///
/// - **DateTime**: A specific point in time, stored as UTC
/// - **AllDay**: A date without a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// A specific datetime, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day date (no specific time).
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

    /// Returns `true` if this is an all-day time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Converts to a UTC instant.
    ///
    /// All-day dates are anchored at midnight UTC so that rendering them in
    /// UTC never shifts the calendar date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}
