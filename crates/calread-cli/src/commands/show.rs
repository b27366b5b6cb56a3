//! `calread show`: list the events of a calendar file.

use std::fmt::Write;
use std::path::Path;

use calread_core::{EventWhen, NormalizedEvent};
use calread_parser::read_calendar_file;
use chrono_tz::Tz;
use tracing::debug;

use crate::config::{ClientConfig, OutputFormat};
use crate::error::ClientResult;

const LABEL_WIDTH: usize = 12;

/// Reads `file` and prints its events as text or JSON.
pub async fn run(
    file: &Path,
    tz: Option<&str>,
    json: bool,
    config: &ClientConfig,
) -> ClientResult<()> {
    let options = config.parse_options()?;
    let events = read_calendar_file(file, &options).await?;
    debug!(file = %file.display(), count = events.len(), "Loaded events");

    if json || config.display.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let tz = config.display_timezone(tz)?;
    print!("{}", render_events(&events, tz));
    Ok(())
}

/// Renders events as numbered text blocks separated by blank lines.
pub fn render_events(events: &[NormalizedEvent], tz: Tz) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }
    events
        .iter()
        .enumerate()
        .map(|(i, event)| render_event(i + 1, event, tz))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_event(position: usize, event: &NormalizedEvent, tz: Tz) -> String {
    let when = EventWhen::for_event(event, tz);
    let mut out = format!("{position}. {}\n", event.summary());

    push_row(&mut out, "When", &format!("{} - {}", when.from, when.to));
    if let Some(recurrence) = event.recurrence() {
        push_row(&mut out, "Repeats", recurrence.text());
    }
    if !event.location().is_empty() {
        push_row(&mut out, "Location", event.location());
    }

    let organizer = event
        .organizer()
        .map_or_else(|| "None".to_string(), ToString::to_string);
    push_row(&mut out, "Sent by", &organizer);

    let attendees = if event.attendees().is_empty() {
        "No attendees listed.".to_string()
    } else {
        event
            .attendees()
            .iter()
            .map(|a| format!("{} [{}]", a.display_name(), a.status.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    push_row(&mut out, "Attendees", &attendees);

    let description = event.description().trim();
    push_row(
        &mut out,
        "Description",
        if description.is_empty() {
            "No description provided."
        } else {
            description
        },
    );

    let links = event.description_links();
    if !links.is_empty() {
        push_row(&mut out, "Links", &links.join("\n"));
    }
    out
}

/// Writes a labelled row; extra lines of `value` are aligned under the first.
fn push_row(out: &mut String, label: &str, value: &str) {
    let mut lines = value.lines();
    let first = lines.next().unwrap_or_default();
    let _ = writeln!(out, "   {:<LABEL_WIDTH$} {first}", format!("{label}:"));
    for line in lines {
        let _ = writeln!(out, "   {:<LABEL_WIDTH$} {line}", "");
    }
}
