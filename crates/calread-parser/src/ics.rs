//! iCalendar (`.ics`) and vCalendar (`.vcs`) decoding.
//!
//! The document is unfolded and read into a component tree with the
//! `icalendar` crate's parser. Every `VEVENT` found in the tree becomes one
//! [`RawEvent`], in document order.

use calread_core::{AttendeeStatus, EventTime};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::parser::{Component, Property, read_calendar, unfold};
use tracing::{debug, warn};

use crate::error::{ParseError, ParseResult};
use crate::raw_event::{RawAttendee, RawEvent, RawOrganizer};
use crate::recurrence::recurrence_for;
use crate::zone::local_to_utc;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Decodes every event in an iCalendar document.
///
/// Fails with [`ParseError::MalformedDocument`] when the text is not a
/// calendar or an event has no readable start.
pub fn decode_ics(text: &str) -> ParseResult<Vec<RawEvent>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let unfolded = unfold(text);
    if !unfolded.to_ascii_uppercase().contains("BEGIN:VCALENDAR") {
        return Err(ParseError::malformed_document(
            "no VCALENDAR component found",
        ));
    }

    let calendar = read_calendar(&unfolded).map_err(ParseError::malformed_document)?;

    let mut components = Vec::new();
    collect_events(&calendar.components, &mut components);

    let events = components
        .into_iter()
        .map(decode_event)
        .collect::<ParseResult<Vec<_>>>()?;

    debug!(count = events.len(), "Decoded ICS document");
    Ok(events)
}

fn collect_events<'a, 'b>(components: &'a [Component<'b>], out: &mut Vec<&'a Component<'b>>) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
            out.push(component);
        } else {
            collect_events(&component.components, out);
        }
    }
}

fn decode_event(vevent: &Component<'_>) -> ParseResult<RawEvent> {
    let uid = text_prop(vevent, "UID");

    let start_prop = find_prop(vevent, "DTSTART").ok_or_else(|| {
        ParseError::malformed_document(format!(
            "event {} has no DTSTART",
            uid.as_deref().unwrap_or("without UID")
        ))
    })?;
    let start = read_event_time(start_prop, "DTSTART")?;

    let end = match find_prop(vevent, "DTEND") {
        Some(prop) => read_event_time(prop, "DTEND")?,
        None => derived_end(vevent, start),
    };

    let mut raw = RawEvent::new(start, end);
    raw.uid = uid;
    raw.summary = text_prop(vevent, "SUMMARY");
    raw.description = text_prop(vevent, "DESCRIPTION");
    raw.location = text_prop(vevent, "LOCATION");

    raw.attendees = vevent
        .properties
        .iter()
        .filter(|p| is_named(p, "ATTENDEE"))
        .map(read_attendee)
        .collect();

    raw.organizer = find_prop(vevent, "ORGANIZER").map(read_organizer);

    if let Some(rrule) = find_prop(vevent, "RRULE") {
        raw.recurrence = Some(recurrence_for(
            rrule.val.as_ref(),
            start.to_utc_datetime(),
        ));
    }

    debug!(
        uid = ?raw.uid,
        summary = ?raw.summary,
        start = ?raw.start,
        attendees = raw.attendees.len(),
        "Parsed event from ICS"
    );

    Ok(raw)
}

fn is_named(prop: &Property<'_>, name: &str) -> bool {
    prop.name.as_ref().eq_ignore_ascii_case(name)
}

fn find_prop<'a, 'b>(component: &'a Component<'b>, name: &str) -> Option<&'a Property<'b>> {
    component.properties.iter().find(|p| is_named(p, name))
}

/// Value of a parameter such as `CN` or `TZID`, without surrounding quotes.
fn param<'a>(prop: &'a Property<'_>, key: &str) -> Option<&'a str> {
    prop.params
        .iter()
        .find(|p| p.key.as_ref().eq_ignore_ascii_case(key))
        .and_then(|p| p.val.as_ref())
        .map(|v| str::trim_matches(v.as_ref(), '"'))
        .filter(|v| !v.is_empty())
}

/// TEXT value of the first property with this name, if non-empty.
///
/// The `icalendar` parser has already reversed TEXT escaping.
fn text_prop(component: &Component<'_>, name: &str) -> Option<String> {
    find_prop(component, name)
        .map(|p| p.val.as_ref().to_string())
        .filter(|v| !v.trim().is_empty())
}

/// Reads a DTSTART or DTEND property.
///
/// Date values stay dates. UTC values are taken as is, floating values are
/// read as UTC, and `TZID` values are resolved through the IANA database.
fn read_event_time(prop: &Property<'_>, name: &str) -> ParseResult<EventTime> {
    let value = prop.val.as_ref().trim();
    let invalid = || ParseError::malformed_document(format!("invalid {name} value: {value:?}"));

    let is_date = param(prop, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()));
    if is_date {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
        return Ok(EventTime::from_date(date));
    }

    if let Some(stamp) = value.strip_suffix(['Z', 'z']) {
        let naive = NaiveDateTime::parse_from_str(stamp, DATE_TIME_FORMAT).map_err(|_| invalid())?;
        return Ok(EventTime::from_utc(naive.and_utc()));
    }

    let naive = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map_err(|_| invalid())?;
    let instant = match param(prop, "TZID") {
        Some(tzid) => resolve_local(naive, tzid),
        None => naive.and_utc(),
    };
    Ok(EventTime::from_utc(instant))
}

fn resolve_local(naive: NaiveDateTime, tzid: &str) -> DateTime<Utc> {
    let Ok(tz) = tzid.trim_start_matches('/').parse::<Tz>() else {
        warn!(tzid, "Unknown TZID, reading time as UTC");
        return naive.and_utc();
    };
    local_to_utc(naive, tz)
}

/// End for an event without DTEND: start plus DURATION, else the start
/// itself, or the next day for date-only starts.
fn derived_end(vevent: &Component<'_>, start: EventTime) -> EventTime {
    if let Some(prop) = find_prop(vevent, "DURATION") {
        let value: &str = prop.val.as_ref();
        match parse_duration(value).and_then(|duration| add_duration(start, duration)) {
            Some(end) => return end,
            None => warn!(value, "Ignoring unreadable or out of range DURATION"),
        }
    }
    match start {
        EventTime::AllDay(date) => date.succ_opt().map_or(start, EventTime::from_date),
        EventTime::DateTime(_) => start,
    }
}

fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (negative, body) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.trim_start_matches('+')),
    };
    let parsed = iso8601::duration(body).ok()?;
    let std_duration: std::time::Duration = parsed.into();
    let duration = Duration::from_std(std_duration).ok()?;
    Some(if negative { -duration } else { duration })
}

/// `None` when the end would fall outside the representable range.
fn add_duration(start: EventTime, duration: Duration) -> Option<EventTime> {
    if let EventTime::AllDay(date) = start
        && duration.num_seconds() % 86_400 == 0
    {
        return date.checked_add_signed(duration).map(EventTime::from_date);
    }
    start
        .to_utc_datetime()
        .checked_add_signed(duration)
        .map(EventTime::from_utc)
}

fn strip_mailto(value: &str) -> &str {
    let value = value.trim();
    match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => value[7..].trim_start(),
        _ => value,
    }
}

fn read_attendee(prop: &Property<'_>) -> RawAttendee {
    RawAttendee {
        email: strip_mailto(prop.val.as_ref()).to_string(),
        display_name: param(prop, "CN").map(str::to_string),
        status: param(prop, "PARTSTAT")
            .map(AttendeeStatus::from_partstat)
            .unwrap_or_default(),
    }
}

fn read_organizer(prop: &Property<'_>) -> RawOrganizer {
    let email = strip_mailto(prop.val.as_ref());
    RawOrganizer {
        email: (!email.is_empty()).then(|| email.to_string()),
        display_name: param(prop, "CN").map(str::to_string),
    }
}
