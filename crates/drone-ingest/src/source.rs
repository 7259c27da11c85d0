//! File boundary: decide whether a source is a CSV roster and read it.

use std::path::Path;

use drone_domain::DroneRecord;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::parser::parse_csv;

/// MIME type browsers and mail clients report for CSV.
pub const CSV_MIME: &str = "text/csv";

/// File extension accepted when no MIME type is available.
pub const CSV_EXTENSION: &str = ".csv";

/// A source is accepted when its MIME type is `text/csv` or its name ends
/// in `.csv`. The extension check is case-sensitive.
#[must_use]
pub fn is_csv_source(file_name: &str, mime: Option<&str>) -> bool {
    mime == Some(CSV_MIME) || file_name.ends_with(CSV_EXTENSION)
}

/// Parse already-loaded text, treating an empty result as
/// [`IngestError::NoValidData`].
pub fn parse_fleet(text: &str) -> Result<Vec<DroneRecord>> {
    let drones = parse_csv(text);
    if drones.is_empty() {
        return Err(IngestError::NoValidData);
    }
    Ok(drones)
}

/// Read a roster file from disk and parse it.
///
/// # Errors
///
/// - [`IngestError::UnsupportedFile`] if the name does not end in `.csv`
/// - [`IngestError::Io`] if the file is missing or is not valid UTF-8
/// - [`IngestError::NoValidData`] if no data rows survive parsing
pub async fn load_fleet(path: impl AsRef<Path>) -> Result<Vec<DroneRecord>> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !is_csv_source(&file_name, None) {
        warn!(file = %path.display(), "Rejected non-CSV source");
        return Err(IngestError::UnsupportedFile(file_name));
    }

    let text = tokio::fs::read_to_string(path).await?;
    debug!(file = %path.display(), bytes = text.len(), "Read roster text");

    let drones = parse_fleet(&text)?;
    info!(file = %path.display(), count = drones.len(), "Successfully loaded drones");
    Ok(drones)
}
