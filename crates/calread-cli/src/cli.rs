//! Command-line interface definition.

use std::path::PathBuf;

use calread_core::LogFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// calread - Read calendar files from the terminal
#[derive(Debug, Parser)]
#[command(name = "calread")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALREAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Layout of log lines on stderr
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Log line layouts selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the events of an .ics, .vcs or .csv file
    Show {
        /// Calendar file to read
        file: PathBuf,

        /// IANA timezone used to display timed events
        #[arg(long)]
        tz: Option<String>,

        /// Output the events as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Export one event to Google Calendar or a standalone .ics file
    Export {
        /// Calendar file to read
        file: PathBuf,

        /// Position of the event in the file, starting at 1
        #[arg(long, default_value = "1")]
        index: usize,

        #[command(flatten)]
        target: ExportTarget,

        /// Where to write the .ics file (defaults to a name derived from the title)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where an exported event goes.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ExportTarget {
    /// Print a Google Calendar link that pre-fills the event
    #[arg(long)]
    pub google: bool,

    /// Write a single-event .ics file
    #[arg(long)]
    pub ics: bool,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
