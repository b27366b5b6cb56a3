//! Client error types.

use std::fmt;

use calread_core::DisplayError;
use calread_parser::ParseError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The calendar file could not be parsed.
    Parse(ParseError),
    /// Rendering failed.
    Display(DisplayError),
    /// The requested event is not in the file.
    EventNotFound { index: usize, count: usize },
    /// Flags that cannot be used together.
    Usage(String),
    /// IO error.
    Io(std::io::Error),
    /// JSON serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Parse(err) => write!(f, "{}", err),
            Self::Display(err) => write!(f, "{}", err),
            Self::EventNotFound { index, count } => {
                write!(f, "no event #{} (the file has {} events)", index, count)
            }
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Json(err) => write!(f, "failed to serialize events: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Display(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseError> for ClientError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<DisplayError> for ClientError {
    fn from(err: DisplayError) -> Self {
        Self::Display(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_keep_their_message() {
        let err = ClientError::from(ParseError::EmptyInput);
        assert_eq!(err.to_string(), "File is empty.");
    }

    #[test]
    fn event_not_found_message() {
        let err = ClientError::EventNotFound { index: 4, count: 2 };
        assert_eq!(err.to_string(), "no event #4 (the file has 2 events)");
    }
}
