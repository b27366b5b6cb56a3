//! Timezone-aware rendering of event times.
//!
//! All-day events are always rendered in UTC, the zone their dates are
//! anchored in, so the calendar date never shifts. Timed events are rendered
//! in the caller's selected IANA zone.
//!
//! ```rust
//! use calread_core::display::format_instant;
//! use chrono::{TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();
//! let text = format_instant(start, "America/New_York", false).unwrap();
//! assert_eq!(text, "January 1, 2024, 10:00:00 AM (EST)");
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::event::NormalizedEvent;

/// Format used for all-day events, e.g. "January 1, 2024".
pub const ALL_DAY_FORMAT: &str = "%B %-d, %Y";

/// Format used for timed events, e.g. "January 1, 2024, 3:00:00 PM (UTC)".
pub const TIMED_FORMAT: &str = "%B %-d, %Y, %-I:%M:%S %p (%Z)";

/// Errors that can occur while rendering times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The timezone identifier is not in the IANA database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Resolves an IANA timezone identifier such as `"Europe/Paris"`.
pub fn parse_timezone(name: &str) -> Result<Tz, DisplayError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DisplayError::UnknownTimezone(name.to_string()))
}

/// Formats an instant for display.
///
/// `timezone` is ignored for all-day values, which always render in UTC.
pub fn format_instant(
    instant: DateTime<Utc>,
    timezone: &str,
    is_all_day: bool,
) -> Result<String, DisplayError> {
    if is_all_day {
        return Ok(instant.format(ALL_DAY_FORMAT).to_string());
    }
    let tz = parse_timezone(timezone)?;
    Ok(format_in_zone(instant, tz, false))
}

/// Formats an instant in an already resolved zone.
pub fn format_in_zone(instant: DateTime<Utc>, tz: Tz, is_all_day: bool) -> String {
    if is_all_day {
        instant.format(ALL_DAY_FORMAT).to_string()
    } else {
        instant.with_timezone(&tz).format(TIMED_FORMAT).to_string()
    }
}

/// The start and end of an event, rendered for one display zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWhen {
    pub from: String,
    pub to: String,
}

impl EventWhen {
    /// Renders an event's start and end in the given zone.
    pub fn for_event(event: &NormalizedEvent, tz: Tz) -> Self {
        Self {
            from: format_in_zone(event.start(), tz, event.is_all_day()),
            to: format_in_zone(event.end(), tz, event.is_all_day()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn timed_event_in_selected_zone() {
        let instant = utc(2024, 7, 4, 18, 5, 9);
        assert_eq!(
            format_instant(instant, "America/New_York", false).unwrap(),
            "July 4, 2024, 2:05:09 PM (EDT)"
        );
        assert_eq!(
            format_instant(instant, "UTC", false).unwrap(),
            "July 4, 2024, 6:05:09 PM (UTC)"
        );
    }

    #[test]
    fn timed_event_can_cross_midnight() {
        let instant = utc(2024, 1, 1, 2, 0, 0);
        assert_eq!(
            format_instant(instant, "America/Los_Angeles", false).unwrap(),
            "December 31, 2023, 6:00:00 PM (PST)"
        );
    }

    #[test]
    fn all_day_ignores_zone() {
        let instant = utc(2024, 1, 1, 0, 0, 0);
        for zone in ["UTC", "Pacific/Kiritimati", "America/Adak", "Asia/Kolkata"] {
            assert_eq!(
                format_instant(instant, zone, true).unwrap(),
                "January 1, 2024"
            );
        }
        // Even an unknown zone is irrelevant for all-day values.
        assert!(format_instant(instant, "Mars/Olympus", true).is_ok());
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = format_instant(utc(2024, 1, 1, 0, 0, 0), "Mars/Olympus", false).unwrap_err();
        assert_eq!(err, DisplayError::UnknownTimezone("Mars/Olympus".to_string()));
        assert_eq!(err.to_string(), "unknown timezone: Mars/Olympus");
    }

    #[test]
    fn event_when_uses_event_flag() {
        let event = NormalizedEvent::new(
            "e1",
            "Trip",
            utc(2024, 1, 1, 0, 0, 0),
            utc(2024, 1, 2, 0, 0, 0),
        )
        .with_all_day(true);
        let when = EventWhen::for_event(&event, chrono_tz::Asia::Tokyo);
        assert_eq!(when.from, "January 1, 2024");
        assert_eq!(when.to, "January 2, 2024");
    }
}
