//! CSV decoding.
//!
//! Calendar exports disagree on column names, so each logical field is looked
//! up through an ordered list of header aliases. The first alias whose cell
//! is non-empty wins.

use calread_core::EventTime;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, error};

use crate::error::{ParseError, ParseResult};
use crate::options::ParseOptions;
use crate::raw_event::{RawAttendee, RawEvent};
use crate::zone::local_to_utc;

/// A logical event field that can be read from a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Summary,
    Start,
    End,
    Description,
    Location,
    Attendees,
}

impl Column {
    /// Header names for this field, highest priority first. Case-sensitive.
    pub fn aliases(self) -> &'static [&'static str] {
        COLUMN_ALIASES
            .iter()
            .find(|(column, _)| *column == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or_default()
    }
}

static COLUMN_ALIASES: [(Column, &[&str]); 6] = [
    (Column::Summary, &["Subject", "subject", "Title", "title"]),
    (Column::Start, &["Start Date", "startDate", "start"]),
    (Column::End, &["End Date", "endDate", "end"]),
    (Column::Description, &["Description", "description"]),
    (Column::Location, &["Location", "location"]),
    (Column::Attendees, &["Attendees", "attendees"]),
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Positions of each field's aliases within one header row.
struct ColumnMap {
    positions: Vec<(Column, Vec<usize>)>,
}

impl ColumnMap {
    fn new(headers: &StringRecord) -> Self {
        let positions = COLUMN_ALIASES
            .iter()
            .map(|(column, aliases)| {
                let found: Vec<usize> = aliases
                    .iter()
                    .filter_map(|alias| headers.iter().position(|h| h == *alias))
                    .collect();
                debug!(?column, columns = ?found, "Resolved CSV column");
                (*column, found)
            })
            .collect();
        Self { positions }
    }

    /// The first non-empty cell among this field's columns.
    fn value<'r>(&self, column: Column, record: &'r StringRecord) -> Option<&'r str> {
        self.positions
            .iter()
            .find(|(c, _)| *c == column)
            .into_iter()
            .flat_map(|(_, positions)| positions.iter())
            .filter_map(|&i| record.get(i))
            .find(|cell| !cell.is_empty())
    }
}

/// Decodes CSV text with a header row into raw events.
///
/// Every event is timed. Rows are numbered from the file's first line, so
/// the first data row is row 2.
pub fn decode_csv(text: &str, options: &ParseOptions) -> ParseResult<Vec<RawEvent>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| table_error(&e))?
        .clone();
    let columns = ColumnMap::new(&headers);

    let mut events = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| table_error(&e))?;
        let row = index + 2;
        events.push(decode_row(&columns, &record, row, options.assumed_timezone)?);
    }

    debug!(count = events.len(), "Decoded CSV table");
    Ok(events)
}

fn table_error(err: &csv::Error) -> ParseError {
    error!(error = %err, "CSV parsing error");
    ParseError::malformed_table(format!("Failed to parse CSV file: {err}"))
}

fn decode_row(
    columns: &ColumnMap,
    record: &StringRecord,
    row: usize,
    tz: Tz,
) -> ParseResult<RawEvent> {
    let (Some(start), Some(end)) = (
        columns.value(Column::Start, record),
        columns.value(Column::End, record),
    ) else {
        return Err(ParseError::MissingRequiredField { row });
    };

    let start = parse_cell(start, tz).ok_or_else(|| invalid(row, "start", start))?;
    let end = parse_cell(end, tz).ok_or_else(|| invalid(row, "end", end))?;

    let mut raw = RawEvent::new(EventTime::from_utc(start), EventTime::from_utc(end));
    raw.summary = columns.value(Column::Summary, record).map(str::to_string);
    raw.description = columns.value(Column::Description, record).map(str::to_string);
    raw.location = columns.value(Column::Location, record).map(str::to_string);
    raw.attendees = columns
        .value(Column::Attendees, record)
        .map(parse_attendees)
        .unwrap_or_default();

    debug!(row, summary = ?raw.summary, start = %start, "Parsed event from CSV");
    Ok(raw)
}

fn invalid(row: usize, field: &'static str, value: &str) -> ParseError {
    ParseError::InvalidDateTime {
        row,
        field,
        value: value.to_string(),
    }
}

fn parse_attendees(cell: &str) -> Vec<RawAttendee> {
    cell.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(RawAttendee::new)
        .collect()
}

/// Reads a date or date-time cell.
///
/// Values with an offset are exact. Values without one are read in `tz`,
/// and bare dates are read as midnight.
pub fn parse_cell(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    Some(local_to_utc(naive, tz))
}
