//! Error types for calendar file parsing.
//!
//! Every [`ParseError`] is fatal for the whole file: no partial event list is
//! ever returned alongside one. Per-event problems that can be recovered from
//! (an untranslatable recurrence rule) use
//! [`RecurrenceError`](crate::recurrence::RecurrenceError) instead and never
//! surface here.

use std::io;

use thiserror::Error;

/// An error that aborted the parse of a calendar file.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file extension is not one of `ics`, `vcs` or `csv`.
    #[error("Unsupported file type. Please use .ics, .vcs, or .csv")]
    UnsupportedFormat {
        /// The extension that was found, lowercased, if any.
        extension: Option<String>,
    },

    /// The file has no content.
    #[error("File is empty.")]
    EmptyInput,

    /// The iCalendar grammar parser rejected the document, or a required
    /// property could not be read.
    #[error("Parsing failed: {0}")]
    MalformedDocument(String),

    /// The tabular parser reported structural errors.
    #[error("Parsing failed: {0}")]
    MalformedTable(String),

    /// A CSV row has no start or no end value.
    ///
    /// `row` is the 1-based line number in the file, counting the header.
    #[error("Parsing failed: Row {row} is missing Start or End date.")]
    MissingRequiredField { row: usize },

    /// A CSV date cell could not be read as a date or date-time.
    #[error("Parsing failed: Row {row} has an invalid {field} date: {value:?}")]
    InvalidDateTime {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// The file could not be read from disk.
    #[error("File could not be read: {0}")]
    ReadFailure(#[from] io::Error),
}

impl ParseError {
    /// Creates a malformed-document error from any displayable cause.
    pub fn malformed_document(cause: impl ToString) -> Self {
        Self::MalformedDocument(cause.to_string())
    }

    /// Creates a malformed-table error from any displayable cause.
    pub fn malformed_table(cause: impl ToString) -> Self {
        Self::MalformedTable(cause.to_string())
    }
}

/// A specialized Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
