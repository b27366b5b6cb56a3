//! Raw event type produced by the decoders.
//!
//! This module defines [`RawEvent`], the shape every decoder emits before
//! normalization. Optional fields stay optional here; the defaulting rules in
//! [`crate::normalize`] turn a raw event into a
//! [`NormalizedEvent`](calread_core::NormalizedEvent).

use calread_core::{AttendeeStatus, EventTime, Recurrence};

/// An attendee as read from the source, before empty emails are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttendee {
    /// The attendee's email address, scheme prefix already stripped.
    pub email: String,
    /// The attendee's display name, if available.
    pub display_name: Option<String>,
    /// The attendee's participation status.
    pub status: AttendeeStatus,
}

impl RawAttendee {
    /// Creates a new attendee with the given email and status NEEDS-ACTION.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            status: AttendeeStatus::NeedsAction,
        }
    }
}

/// The organizer as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOrganizer {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// A raw calendar event from one of the decoders.
///
/// # Source-specific notes
///
/// - **ICS/VCS**: `uid` comes from the `UID` property and may be missing.
/// - **CSV**: `uid` is always `None`; the normalizer synthesizes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    // === Required fields ===
    /// When the event starts.
    pub start: EventTime,

    /// When the event ends.
    pub end: EventTime,

    // === Common fields ===
    /// Identifier declared by the source, if any.
    pub uid: Option<String>,

    /// The event title/summary.
    pub summary: Option<String>,

    /// The event description.
    pub description: Option<String>,

    /// The event location.
    pub location: Option<String>,

    // === People ===
    /// List of event attendees, in source order.
    pub attendees: Vec<RawAttendee>,

    /// The organizer, if declared.
    pub organizer: Option<RawOrganizer>,

    // === Recurrence ===
    /// The translated or raw recurrence rule.
    pub recurrence: Option<Recurrence>,
}

impl RawEvent {
    /// Creates a new raw event with the minimum required fields.
    pub fn new(start: EventTime, end: EventTime) -> Self {
        Self {
            start,
            end,
            uid: None,
            summary: None,
            description: None,
            location: None,
            attendees: Vec::new(),
            organizer: None,
            recurrence: None,
        }
    }

    /// Returns true if this is an all-day event.
    ///
    /// Only the start decides; an all-day start with a timed end is still
    /// an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Builder method to set the uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to add an attendee.
    pub fn with_attendee(mut self, attendee: RawAttendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: RawOrganizer) -> Self {
        self.organizer = Some(organizer);
        self
    }

    /// Builder method to set the recurrence.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}
