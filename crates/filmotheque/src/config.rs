//! Store and exchange configuration.

use serde::{Deserialize, Serialize};

/// Storage key the rating map lives under.
pub const STORAGE_KEY: &str = "movieRatings";

/// Version string written into export metadata.
pub const FORMAT_VERSION: &str = "1.0";

/// Largest import file accepted, in bytes (1 MiB).
pub const MAX_IMPORT_BYTES: usize = 1024 * 1024;

/// Prefix for exported file names.
pub const DEFAULT_EXPORT_PREFIX: &str = "filmotheque";

/// Configuration for a [`RatingStore`](crate::RatingStore) and its exchange files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key of the single storage entry holding all ratings.
    pub storage_key: String,
    /// Maximum size of an import file.
    pub max_import_bytes: usize,
    /// Version written into export metadata.
    pub format_version: String,
    /// Prefix of export file names: `<prefix>-ratings-<date>.json`.
    pub export_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            max_import_bytes: MAX_IMPORT_BYTES,
            format_version: FORMAT_VERSION.to_string(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Change the import size limit.
    pub fn with_max_import_bytes(mut self, bytes: usize) -> Self {
        self.max_import_bytes = bytes;
        self
    }

    /// Change the export file name prefix.
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }
}
