//! Parse options.

use chrono_tz::Tz;

/// Options that tune how a file is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Zone used for CSV date cells that carry no UTC offset.
    pub assumed_timezone: Tz,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            assumed_timezone: Tz::UTC,
        }
    }
}

impl ParseOptions {
    /// Builder method to set the zone for offset-less CSV values.
    #[must_use]
    pub fn with_assumed_timezone(mut self, tz: Tz) -> Self {
        self.assumed_timezone = tz;
        self
    }
}
