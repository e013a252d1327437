//! Error types for the starforge library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for starforge operations.
#[derive(Debug, Error)]
pub enum StarforgeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter specified. Delimiters must be single ASCII bytes.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A materialized table has ragged rows. This is a contract violation
    /// by the producer, not a data-quality issue.
    #[error("Shape mismatch in table '{table}': row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The persistence sink rejected a table. Fatal for that table only.
    #[error("Sink rejected table '{table}': {message}")]
    Sink { table: String, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for starforge operations.
pub type Result<T> = std::result::Result<T, StarforgeError>;
