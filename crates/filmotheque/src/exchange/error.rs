//! Import failures.

use thiserror::Error;

use crate::error::FilmothequeError;

/// Why an import was refused. In every case the stored ratings are untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The ratings could not be written.
    #[error("Ratings storage is unavailable: {0}")]
    StorageUnavailable(String),

    /// The file is not valid JSON.
    #[error("The file is not valid JSON: {0}")]
    MalformedImport(String),

    /// The checksum does not match the ratings.
    #[error("The file is corrupted or was edited: checksum {actual} does not match the ratings (expected {expected})")]
    IntegrityMismatch { expected: String, actual: String },

    /// The structure or values do not follow the export format.
    #[error("The file does not follow the ratings export format: {0}")]
    SchemaViolation(String),

    /// The file is larger than the import limit.
    #[error("The file is too large ({size} bytes, limit {limit} bytes)")]
    OversizeFile { size: usize, limit: usize },

    /// The file is not declared as JSON.
    #[error("Expected a JSON file, got '{0}'")]
    WrongFileType(String),
}

impl From<FilmothequeError> for ImportError {
    fn from(err: FilmothequeError) -> Self {
        match err {
            FilmothequeError::Json(e) => ImportError::MalformedImport(e.to_string()),
            other => ImportError::StorageUnavailable(other.to_string()),
        }
    }
}

impl ImportError {
    /// Short machine-readable label, e.g. for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::StorageUnavailable(_) => "storage_unavailable",
            ImportError::MalformedImport(_) => "malformed_import",
            ImportError::IntegrityMismatch { .. } => "integrity_mismatch",
            ImportError::SchemaViolation(_) => "schema_violation",
            ImportError::OversizeFile { .. } => "oversize_file",
            ImportError::WrongFileType(_) => "wrong_file_type",
        }
    }
}
