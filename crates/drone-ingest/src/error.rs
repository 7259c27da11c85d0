//! Ingestion error types.

use thiserror::Error;

/// Errors raised at the file boundary. Parsing itself never fails.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Neither the extension nor the MIME type identifies a CSV file
    #[error("Unsupported file: {0} (please provide a CSV file)")]
    UnsupportedFile(String),

    /// The text parsed to zero records
    #[error("No valid data found in the CSV file")]
    NoValidData,

    /// The file could not be read as text
    #[error("Failed to read the file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
