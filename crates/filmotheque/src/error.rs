//! Error types for the Filmotheque library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Filmotheque operations.
#[derive(Debug, Error)]
pub enum FilmothequeError {
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

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The persistence layer rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] BackendError),

    /// Empty file or no rows to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A rating outside the 0-10 integer range.
    #[error("Invalid rating {0}: expected an integer from 0 to 10")]
    InvalidRating(i64),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure reported by a [`KeyValueBackend`](crate::ratings::KeyValueBackend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The write would exceed the storage quota.
    #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Storage is disabled or could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for Filmotheque operations.
pub type Result<T> = std::result::Result<T, FilmothequeError>;
