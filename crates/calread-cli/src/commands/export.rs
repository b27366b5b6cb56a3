//! `calread export`: hand one event to another calendar.

use std::path::{Path, PathBuf};

use calread_core::{NormalizedEvent, download_file_name, google_calendar_url, single_event_ics};
use calread_parser::read_calendar_file;
use tracing::info;

use crate::cli::ExportTarget;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dispatches `export` to the selected target.
pub async fn run(
    file: &Path,
    index: usize,
    target: &ExportTarget,
    out: Option<PathBuf>,
    config: &ClientConfig,
) -> ClientResult<()> {
    if target.google {
        if out.is_some() {
            return Err(ClientError::Usage(
                "--out can only be used with --ics".to_string(),
            ));
        }
        google(file, index, config).await
    } else {
        ics(file, index, out, config).await.map(|_| ())
    }
}

/// Prints a Google Calendar link for event number `index`.
pub async fn google(file: &Path, index: usize, config: &ClientConfig) -> ClientResult<()> {
    let event = load_event(file, index, config).await?;
    println!("{}", google_calendar_url(&event));
    Ok(())
}

/// Writes event number `index` to a standalone `.ics` file.
///
/// Without `out`, the file name is derived from the event title and written
/// to the current directory.
pub async fn ics(
    file: &Path,
    index: usize,
    out: Option<PathBuf>,
    config: &ClientConfig,
) -> ClientResult<PathBuf> {
    let event = load_event(file, index, config).await?;
    let path = out.unwrap_or_else(|| PathBuf::from(download_file_name(&event)));
    tokio::fs::write(&path, single_event_ics(&event)).await?;
    info!(uid = event.uid(), path = %path.display(), "Exported event");
    println!("wrote {}", path.display());
    Ok(path)
}

async fn load_event(file: &Path, index: usize, config: &ClientConfig) -> ClientResult<NormalizedEvent> {
    let options = config.parse_options()?;
    let events = read_calendar_file(file, &options).await?;
    select_event(events, index)
}

/// Takes the event at 1-based `index`.
fn select_event(events: Vec<NormalizedEvent>, index: usize) -> ClientResult<NormalizedEvent> {
    let count = events.len();
    index
        .checked_sub(1)
        .and_then(|i| events.into_iter().nth(i))
        .ok_or(ClientError::EventNotFound { index, count })
}
