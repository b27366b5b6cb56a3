//! Export of a single normalized event.
//!
//! Two targets are supported: a Google Calendar "render" URL that pre-fills a
//! new event, and a minimal one-event iCalendar file suitable for download
//! into Apple Calendar or any other client.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

use crate::event::NormalizedEvent;

const GOOGLE_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Product identifier written into exported files.
pub const PRODID: &str = "-//Calendar File Reader//EN";

static FILE_NAME_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("file name regex should be valid"));

/// Formats an instant as a compact UTC timestamp, e.g. `20240101T100000Z`.
pub fn compact_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds a Google Calendar URL that opens a pre-filled event editor.
pub fn google_calendar_url(event: &NormalizedEvent) -> Url {
    let dates = format!(
        "{}/{}",
        compact_timestamp(event.start()),
        compact_timestamp(event.end())
    );
    let params = [
        ("action", "TEMPLATE"),
        ("text", event.summary()),
        ("dates", dates.as_str()),
        ("details", event.description()),
        ("location", event.location()),
    ];
    let mut url = Url::parse(GOOGLE_RENDER_URL).expect("static URL should be valid");
    url.query_pairs_mut().extend_pairs(params);
    url
}

/// Builds a minimal iCalendar document holding just this event.
///
/// Lines are CRLF-terminated except the last, and TEXT values are escaped so
/// the document reads back to the same summary, description and location.
pub fn single_event_ics(event: &NormalizedEvent) -> String {
    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", event.uid()),
        format!("DTSTART:{}", compact_timestamp(event.start())),
        format!("DTEND:{}", compact_timestamp(event.end())),
        format!("SUMMARY:{}", escape_text(event.summary())),
        format!("DESCRIPTION:{}", escape_text(event.description())),
        format!("LOCATION:{}", escape_text(event.location())),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n")
}

/// Suggests a download file name derived from the event summary.
pub fn download_file_name(event: &NormalizedEvent) -> String {
    format!("{}.ics", FILE_NAME_UNSAFE.replace_all(event.summary(), "_"))
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
