//! Error types for ingestion and export

use thiserror::Error;

/// Structural problems with an uploaded CSV.
///
/// Only these are fatal. Bad numeric cells and blank statuses are recovered
/// row by row and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// No non-blank lines in the input
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row lacks one or more required columns (listed in required order)
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl IngestError {
    /// Names of the missing columns, empty for other variants
    pub fn missing_columns(&self) -> &[String] {
        match self {
            IngestError::MissingColumns(cols) => cols,
            IngestError::EmptyFile => &[],
        }
    }
}

/// Failures while serializing a `ProcessedAnalytics` bundle
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV writer could not be flushed: {0}")]
    Io(#[from] std::io::Error),
}
