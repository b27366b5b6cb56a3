//! Format detection from the file name.

use std::fmt;

use crate::error::ParseError;

/// The decoding strategy for a calendar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// iCalendar, including the legacy vCalendar (`.vcs`) variant.
    Ics,
    /// Comma-separated table with a header row.
    Csv,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ics => "ics",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks a decoder from the text after the last `.` of `file_name`.
///
/// The comparison is case-insensitive. A name without a dot has no
/// extension and is rejected.
pub fn detect_format(file_name: &str) -> Result<FileFormat, ParseError> {
    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return Err(ParseError::UnsupportedFormat { extension: None });
    };
    let extension = extension.to_ascii_lowercase();

    match extension.as_str() {
        "ics" | "vcs" => Ok(FileFormat::Ics),
        "csv" => Ok(FileFormat::Csv),
        _ => Err(ParseError::UnsupportedFormat {
            extension: Some(extension),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_known_extensions() {
        assert_eq!(detect_format("work.ics").unwrap(), FileFormat::Ics);
        assert_eq!(detect_format("legacy.vcs").unwrap(), FileFormat::Ics);
        assert_eq!(detect_format("export.csv").unwrap(), FileFormat::Csv);
        assert_eq!(detect_format("UPPER.ICS").unwrap(), FileFormat::Ics);
        assert_eq!(detect_format("my.backup.Csv").unwrap(), FileFormat::Csv);
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["notes.txt", "calendar.ics.bak", "README", "", "ics"] {
            assert!(
                matches!(
                    detect_format(name),
                    Err(ParseError::UnsupportedFormat { .. })
                ),
                "{name} should be unsupported"
            );
        }
    }

    #[test]
    fn reports_found_extension() {
        match detect_format("agenda.TXT") {
            Err(ParseError::UnsupportedFormat { extension }) => {
                assert_eq!(extension.as_deref(), Some("txt"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            detect_format("Makefile"),
            Err(ParseError::UnsupportedFormat { extension: None })
        ));
    }
}
