//! Error types for record ingestion.
//!
//! The aggregation engine itself never errors; malformed input degrades to
//! defined fallback values. Only loading a record collection can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while loading a record collection.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV parse error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("JSON parse error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("unsupported source format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
}
