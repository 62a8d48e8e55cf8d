//! The export envelope: ratings, metadata, and a checksum over the ratings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::checksum;
use crate::error::Result;
use crate::ratings::{RatingMap, RecordKey, StoredRating};

use super::error::ImportError;
use super::validate::check_envelope;

/// Export metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// When the export was made (RFC 3339).
    pub export_date: String,
    /// Format version.
    pub version: String,
}

/// An exported set of ratings.
///
/// ```json
/// {
///   "ratings": { "tt0133093": { "rating": 8, "title": "Matrix", "imdbId": "tt0133093", "lastUpdated": "..." } },
///   "metadata": { "exportDate": "2024-01-01T00:00:00.000Z", "version": "1.0" },
///   "checksum": "1f0c3a9e"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEnvelope {
    /// The ratings, keyed by record key.
    pub ratings: RatingMap,
    /// Export metadata.
    pub metadata: ExportMetadata,
    /// Checksum of `ratings`.
    pub checksum: String,
}

impl ExportEnvelope {
    /// Wrap ratings and compute their checksum.
    pub fn seal(ratings: RatingMap, metadata: ExportMetadata) -> Result<Self> {
        let checksum = checksum(&ratings)?;
        Ok(Self {
            ratings,
            metadata,
            checksum,
        })
    }

    /// Pretty-printed JSON, as written to export files.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of ratings carried.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Whether no ratings are carried.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Parse and validate envelope text.
///
/// The checksum is verified against the ratings exactly as they appear in the
/// file; bare-integer records are normalized only after validation passes.
pub fn parse_envelope(text: &str) -> std::result::Result<ExportEnvelope, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::MalformedImport(e.to_string()))?;
    check_envelope(&value)?;
    envelope_from_value(value)
}

/// Convert a validated tree into typed form.
fn envelope_from_value(mut value: Value) -> std::result::Result<ExportEnvelope, ImportError> {
    let metadata: ExportMetadata = serde_json::from_value(value["metadata"].take())
        .map_err(|e| ImportError::SchemaViolation(e.to_string()))?;
    let checksum = value["checksum"].as_str().unwrap_or_default().to_string();

    let mut ratings = RatingMap::new();
    if let Value::Object(entries) = value["ratings"].take() {
        for (key, record) in entries {
            let key = RecordKey::new(key);
            let stored: StoredRating = serde_json::from_value(record).map_err(|e| {
                ImportError::SchemaViolation(format!("rating '{}': {}", key, e))
            })?;
            let record = stored.normalize(&key);
            ratings.insert(key, record);
        }
    }

    Ok(ExportEnvelope {
        ratings,
        metadata,
        checksum,
    })
}
