//! Event types for normalized calendar events.
//!
//! This module provides the record produced by every decoder:
//! - [`NormalizedEvent`]: A format-agnostic event representation
//! - [`Attendee`] and [`Organizer`]: The people attached to an event
//! - [`AttendeeStatus`]: The participation state of an attendee
//! - [`Recurrence`]: A described recurrence rule, or its raw text

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title used when the source event has none.
pub const PLACEHOLDER_SUMMARY: &str = "No Title";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("URL regex should be valid"));

/// The participation status of an event attendee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum AttendeeStatus {
    /// The attendee has accepted the invitation.
    Accepted,
    /// The attendee has declined the invitation.
    Declined,
    /// The attendee has tentatively accepted.
    Tentative,
    /// The attendee has not responded.
    #[default]
    NeedsAction,
}

impl AttendeeStatus {
    /// Returns the iCalendar `PARTSTAT` token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Tentative => "TENTATIVE",
            Self::NeedsAction => "NEEDS-ACTION",
        }
    }

    /// Parses a `PARTSTAT` value, case-insensitively.
    ///
    /// Values outside the four known states (`DELEGATED`, `COMPLETED`,
    /// `IN-PROCESS`, experimental tokens) map to [`AttendeeStatus::NeedsAction`].
    pub fn from_partstat(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for AttendeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four attendee states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendee status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttendeeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" => Ok(Self::Accepted),
            "DECLINED" => Ok(Self::Declined),
            "TENTATIVE" => Ok(Self::Tentative),
            "NEEDS-ACTION" => Ok(Self::NeedsAction),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// An attendee of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Display name, when the source provides one.
    pub name: Option<String>,
    /// Email address. Never empty.
    pub email: String,
    /// Participation status.
    pub status: AttendeeStatus,
}

impl Attendee {
    /// Creates an attendee with no name and status NEEDS-ACTION.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            status: AttendeeStatus::NeedsAction,
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the participation status.
    pub fn with_status(mut self, status: AttendeeStatus) -> Self {
        self.status = status;
        self
    }

    /// The name to show for this attendee, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// The organizer of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub email: Option<String>,
}

impl fmt::Display for Organizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.email {
            Some(ref email) => write!(f, "{} ({})", self.name, email),
            None => f.write_str(&self.name),
        }
    }
}

/// The recurrence attached to an event.
///
/// A rule that could be translated carries a human-readable description;
/// one that could not keeps the raw rule text so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Recurrence {
    /// A rendered description such as "every week on Monday".
    Described(String),
    /// The raw rule tokens, e.g. `FREQ=WEEKLY;UNTIL=...`.
    Raw(String),
}

impl Recurrence {
    /// Returns the text to display, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Self::Described(text) | Self::Raw(text) => text,
        }
    }

    /// Returns true if the rule could not be translated.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A normalized calendar event from any supported file format.
///
/// This is the canonical representation produced by the parser. Fields are
/// read through accessors; once built, a record is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    uid: String,
    summary: String,
    description: String,
    location: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer: Option<Organizer>,
    attendees: Vec<Attendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<Recurrence>,
}

impl NormalizedEvent {
    /// Creates a new timed event with the required fields.
    pub fn new(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start_date: start,
            end_date: end,
            is_all_day: false,
            organizer: None,
            attendees: Vec::new(),
            recurrence: None,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// When the event starts. All-day events start at midnight UTC.
    pub fn start(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// When the event ends. Not guaranteed to be after [`start`](Self::start).
    pub fn end(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn is_all_day(&self) -> bool {
        self.is_all_day
    }

    pub fn organizer(&self) -> Option<&Organizer> {
        self.organizer.as_ref()
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }

    /// Returns the `http`/`https` URLs found in the description, in order.
    pub fn description_links(&self) -> Vec<&str> {
        URL_RE
            .find_iter(&self.description)
            .map(|m| m.as_str())
            .collect()
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to mark as an all-day event.
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: Organizer) -> Self {
        self.organizer = Some(organizer);
        self
    }

    /// Builder method to set attendees.
    pub fn with_attendees(mut self, attendees: Vec<Attendee>) -> Self {
        self.attendees = attendees;
        self
    }

    /// Builder method to set the recurrence.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sample_event() -> NormalizedEvent {
        NormalizedEvent::new(
            "evt-123",
            "Team Standup",
            utc(2025, 2, 5, 10, 0, 0),
            utc(2025, 2, 5, 10, 30, 0),
        )
    }

    mod attendee_status {
        use super::*;

        #[test]
        fn parses_known_tokens() {
            assert_eq!(
                AttendeeStatus::from_partstat("ACCEPTED"),
                AttendeeStatus::Accepted
            );
            assert_eq!(
                AttendeeStatus::from_partstat("declined"),
                AttendeeStatus::Declined
            );
            assert_eq!(
                AttendeeStatus::from_partstat("Tentative"),
                AttendeeStatus::Tentative
            );
            assert_eq!(
                AttendeeStatus::from_partstat("needs-action"),
                AttendeeStatus::NeedsAction
            );
        }

        #[test]
        fn unknown_tokens_need_action() {
            assert_eq!(
                AttendeeStatus::from_partstat("DELEGATED"),
                AttendeeStatus::NeedsAction
            );
            assert_eq!(
                AttendeeStatus::from_partstat(""),
                AttendeeStatus::NeedsAction
            );
            assert!("X-MAYBE".parse::<AttendeeStatus>().is_err());
        }

        #[test]
        fn serializes_as_partstat_token() {
            let json = serde_json::to_string(&AttendeeStatus::NeedsAction).unwrap();
            assert_eq!(json, "\"NEEDS-ACTION\"");
            let parsed: AttendeeStatus = serde_json::from_str("\"TENTATIVE\"").unwrap();
            assert_eq!(parsed, AttendeeStatus::Tentative);
        }
    }

    mod people {
        use super::*;

        #[test]
        fn attendee_display_name_falls_back_to_email() {
            let anonymous = Attendee::new("bob@example.com");
            assert_eq!(anonymous.display_name(), "bob@example.com");

            let named = Attendee::new("alice@example.com").with_name("Alice");
            assert_eq!(named.display_name(), "Alice");
        }

        #[test]
        fn organizer_display() {
            let organizer = Organizer {
                name: "Carol".to_string(),
                email: Some("carol@example.com".to_string()),
            };
            assert_eq!(organizer.to_string(), "Carol (carol@example.com)");

            let organizer = Organizer {
                name: "Front Desk".to_string(),
                email: None,
            };
            assert_eq!(organizer.to_string(), "Front Desk");
        }
    }

    mod recurrence {
        use super::*;

        #[test]
        fn text_of_both_variants() {
            let described = Recurrence::Described("every day".to_string());
            assert_eq!(described.text(), "every day");
            assert!(!described.is_raw());

            let raw = Recurrence::Raw("FREQ=FORTNIGHTLY".to_string());
            assert_eq!(raw.to_string(), "FREQ=FORTNIGHTLY");
            assert!(raw.is_raw());
        }

        #[test]
        fn serde_shape() {
            let json = serde_json::to_value(Recurrence::Raw("FREQ=X".to_string())).unwrap();
            assert_eq!(json["kind"], "raw");
            assert_eq!(json["text"], "FREQ=X");
        }
    }

    mod normalized_event {
        use super::*;

        #[test]
        fn basic_creation() {
            let event = sample_event();
            assert_eq!(event.uid(), "evt-123");
            assert_eq!(event.summary(), "Team Standup");
            assert_eq!(event.description(), "");
            assert_eq!(event.location(), "");
            assert!(!event.is_all_day());
            assert!(event.organizer().is_none());
            assert!(event.attendees().is_empty());
            assert!(event.recurrence().is_none());
        }

        #[test]
        fn builder_pattern() {
            let event = sample_event()
                .with_description("Weekly sync")
                .with_location("Room 101")
                .with_all_day(true)
                .with_attendees(vec![Attendee::new("a@example.com")])
                .with_recurrence(Recurrence::Described("every week".to_string()));

            assert_eq!(event.description(), "Weekly sync");
            assert_eq!(event.location(), "Room 101");
            assert!(event.is_all_day());
            assert_eq!(event.attendees().len(), 1);
            assert_eq!(event.recurrence().map(Recurrence::text), Some("every week"));
        }

        #[test]
        fn description_links_in_order() {
            let event = sample_event().with_description(
                "Agenda at https://docs.example.com/a and join http://meet.example.com/x\nthanks",
            );
            assert_eq!(
                event.description_links(),
                vec!["https://docs.example.com/a", "http://meet.example.com/x"]
            );
            assert!(sample_event().description_links().is_empty());
        }

        #[test]
        fn serde_roundtrip() {
            let event = sample_event().with_organizer(Organizer {
                name: "Carol".to_string(),
                email: Some("carol@example.com".to_string()),
            });

            let json = serde_json::to_string(&event).unwrap();
            assert!(json.contains("\"startDate\""));
            assert!(json.contains("\"isAllDay\":false"));
            let parsed: NormalizedEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, parsed);
        }
    }
}
