//! RawEvent to NormalizedEvent conversion.
//!
//! This is the common tail of every decoder. It applies the defaulting rules
//! so that each [`NormalizedEvent`] leaving the parser has a non-empty uid
//! and summary, and only attendees with an email.
//!
//! The normalization process:
//! 1. Assigns a uid when the source declared none
//! 2. Defaults summary, description and location
//! 3. Derives the all-day flag from the start value
//! 4. Drops attendees without an email and names the organizer

use std::fmt::Write;

use calread_core::{Attendee, NormalizedEvent, Organizer, PLACEHOLDER_SUMMARY};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::format::FileFormat;
use crate::raw_event::{RawEvent, RawOrganizer};

/// Hex digits of the content hash used in synthesized uids.
const BATCH_ID_LEN: usize = 12;

/// Normalizes the events decoded from one file.
///
/// Synthesized uids have the form `<format>-<batch>-<index>`, where `batch`
/// is derived from the file content. Parsing the same content twice yields
/// the same uids.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    format: FileFormat,
    batch_id: String,
}

impl EventNormalizer {
    /// Creates a normalizer for a file of the given format and content.
    pub fn new(format: FileFormat, text: &str) -> Self {
        Self {
            format,
            batch_id: batch_id(text),
        }
    }

    /// The content-derived part of synthesized uids.
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Converts one raw event, `index` being its position in the file.
    pub fn normalize(&self, raw: RawEvent, index: usize) -> NormalizedEvent {
        let is_all_day = raw.is_all_day();
        let uid = raw
            .uid
            .filter(|uid| !uid.trim().is_empty())
            .unwrap_or_else(|| self.synthesized_uid(index));

        let summary = raw
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_SUMMARY.to_string());

        let attendees = raw
            .attendees
            .into_iter()
            .filter_map(|attendee| {
                if attendee.email.trim().is_empty() {
                    warn!(uid = %uid, name = ?attendee.display_name, "Dropping attendee without email");
                    return None;
                }
                let mut normalized = Attendee::new(attendee.email).with_status(attendee.status);
                if let Some(name) = attendee.display_name {
                    normalized = normalized.with_name(name);
                }
                Some(normalized)
            })
            .collect();

        let mut event = NormalizedEvent::new(
            uid,
            summary,
            raw.start.to_utc_datetime(),
            raw.end.to_utc_datetime(),
        )
        .with_all_day(is_all_day)
        .with_description(raw.description.unwrap_or_default())
        .with_location(raw.location.unwrap_or_default())
        .with_attendees(attendees);

        if let Some(organizer) = raw.organizer.and_then(normalize_organizer) {
            event = event.with_organizer(organizer);
        }

        if let Some(recurrence) = raw.recurrence {
            event = event.with_recurrence(recurrence);
        }

        event
    }

    /// Normalizes a whole batch, keeping source order.
    pub fn normalize_all(&self, raw_events: Vec<RawEvent>) -> Vec<NormalizedEvent> {
        raw_events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.normalize(raw, index))
            .collect()
    }

    fn synthesized_uid(&self, index: usize) -> String {
        format!("{}-{}-{index}", self.format, self.batch_id)
    }
}

/// First hex digits of the SHA-256 of the file text.
fn batch_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(BATCH_ID_LEN);
    for byte in digest.iter().take(BATCH_ID_LEN / 2) {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Organizer name defaults to the local part of the email.
fn normalize_organizer(raw: RawOrganizer) -> Option<Organizer> {
    let email = raw.email.filter(|e| !e.trim().is_empty());
    let name = raw
        .display_name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })?;
    Some(Organizer { name, email })
}
