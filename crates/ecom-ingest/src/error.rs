//! Error types for source extract ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or loading the source extracts.
///
/// Every variant is a configuration error: the run aborts before any output.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An expected source extract is absent from the data directory.
    #[error("{table} extract not found: expected {path}")]
    FileNotFound { table: String, path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to parse the header row.
    #[error("failed to read CSV header {path}: {message}")]
    HeaderRead { path: PathBuf, message: String },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// A key or analysis column is missing from a source extract.
    #[error("required column '{column}' not found in {table} extract {path}")]
    MissingColumn {
        table: String,
        column: String,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            table: "orders".to_string(),
            column: "order_id".to_string(),
            path: PathBuf::from("data/orders_dataset.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'order_id' not found in orders extract data/orders_dataset.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
