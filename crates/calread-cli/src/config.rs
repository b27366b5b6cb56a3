//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calread/config.toml` by default:
//!
//! ```toml
//! [display]
//! timezone = "America/New_York"
//! output = "text"
//!
//! [parser]
//! assumed_timezone = "UTC"
//! ```

use std::path::{Path, PathBuf};

use calread_core::{DisplayError, parse_timezone};
use calread_parser::ParseOptions;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for the calread client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Display settings.
    pub display: DisplaySettings,

    /// Parser settings.
    pub parser: ParserSettings,
}

/// How `show` renders events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// IANA zone for timed events. The system zone is used when unset.
    pub timezone: Option<String>,

    /// Default output format.
    pub output: OutputFormat,
}

/// Settings passed through to the file decoders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Zone for CSV date cells that carry no offset. UTC when unset.
    pub assumed_timezone: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calread")
    }

    /// Checks that every configured zone name exists.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref zone) = self.display.timezone {
            parse_timezone(zone).map_err(|e| format!("[display] timezone: {}", e))?;
        }
        if let Some(ref zone) = self.parser.assumed_timezone {
            parse_timezone(zone).map_err(|e| format!("[parser] assumed_timezone: {}", e))?;
        }
        Ok(())
    }

    /// Picks the display zone: the flag, then the config file, then the
    /// system zone, then UTC.
    pub fn display_timezone(&self, flag: Option<&str>) -> Result<Tz, DisplayError> {
        if let Some(zone) = flag.or(self.display.timezone.as_deref()) {
            return parse_timezone(zone);
        }
        Ok(system_timezone())
    }

    /// Builds the decoder options from the `[parser]` section.
    pub fn parse_options(&self) -> Result<ParseOptions, DisplayError> {
        let mut options = ParseOptions::default();
        if let Some(ref zone) = self.parser.assumed_timezone {
            options = options.with_assumed_timezone(parse_timezone(zone)?);
        }
        Ok(options)
    }
}

fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => parse_timezone(&name).unwrap_or_else(|_| {
            warn!(zone = %name, "System timezone is not in the IANA database, using UTC");
            Tz::UTC
        }),
        Err(_) => {
            warn!("Failed to get timezone, using UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_file() {
        let file = write_config(
            "[display]\ntimezone = \"Europe/Paris\"\noutput = \"json\"\n\n\
             [parser]\nassumed_timezone = \"America/New_York\"\n",
        );
        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.display.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(config.display.output, OutputFormat::Json);
        assert_eq!(
            config.parser.assumed_timezone.as_deref(),
            Some("America/New_York")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let file = write_config("[display]\ntimezone = \"Asia/Tokyo\"\n");
        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.display.output, OutputFormat::Text);
        assert_eq!(config.parser, ParserSettings::default());
    }

    #[test]
    fn unreadable_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.starts_with("failed to read config"));

        let file = write_config("[display]\noutput = \"yaml\"\n");
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.starts_with("failed to parse config"));
    }

    #[test]
    fn validate_names_the_bad_setting() {
        let mut config = ClientConfig::default();
        config.parser.assumed_timezone = Some("Mars/Olympus".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("assumed_timezone"));
        assert!(err.contains("Mars/Olympus"));
    }

    #[test]
    fn flag_beats_config_zone() {
        let mut config = ClientConfig::default();
        config.display.timezone = Some("Europe/Paris".to_string());
        assert_eq!(
            config.display_timezone(Some("Asia/Tokyo")).unwrap(),
            chrono_tz::Asia::Tokyo
        );
        assert_eq!(
            config.display_timezone(None).unwrap(),
            chrono_tz::Europe::Paris
        );
        assert!(config.display_timezone(Some("Nowhere/Else")).is_err());
    }

    #[test]
    fn parse_options_follow_parser_section() {
        let mut config = ClientConfig::default();
        assert_eq!(config.parse_options().unwrap().assumed_timezone, Tz::UTC);

        config.parser.assumed_timezone = Some("America/New_York".to_string());
        assert_eq!(
            config.parse_options().unwrap().assumed_timezone,
            chrono_tz::America::New_York
        );
    }

    #[test]
    fn dump_round_trips() {
        let mut config = ClientConfig::default();
        config.display.timezone = Some("UTC".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[display]"));
        assert_eq!(toml::from_str::<ClientConfig>(&text).unwrap(), config);
    }
}
