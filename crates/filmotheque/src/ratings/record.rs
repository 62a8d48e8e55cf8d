//! Rating records and their identity.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FilmothequeError, Result};

/// Highest rating a movie can get.
pub const MAX_RATING: u8 = 10;

/// Identity a rating is stored under.
///
/// The IMDb id when the movie has one, otherwise its display title. Two
/// different movies sharing a title and lacking an IMDb id map to the same key
/// and overwrite each other's rating; nothing here tries to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Wrap a raw persisted key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for a movie: its IMDb id if non-blank, else its title.
    pub fn for_movie(title: &str, imdb_id: Option<&str>) -> Self {
        match imdb_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self(id.to_string()),
            None => Self(title.trim().to_string()),
        }
    }

    /// The persisted key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty, which no stored record may have.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RecordKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A star rating from 0 (unrated) to 10.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// No rating.
    pub const UNRATED: Rating = Rating(0);

    /// Create a rating, rejecting values above [`MAX_RATING`].
    pub fn new(value: u8) -> Result<Self> {
        Self::try_from(i64::from(value))
    }

    /// The numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the movie has actually been rated.
    pub fn is_rated(self) -> bool {
        self.0 > 0
    }

    /// Read a rating from JSON: only integers 0..=10 qualify.
    pub fn from_json(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| Self::try_from(v).ok())
    }
}

impl TryFrom<i64> for Rating {
    type Error = FilmothequeError;

    fn try_from(value: i64) -> Result<Self> {
        if (0..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(FilmothequeError::InvalidRating(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie's rating as persisted and exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    /// Rating value, 0-10.
    pub rating: Rating,
    /// Display title; never empty.
    pub title: String,
    /// IMDb id (`tt...`) when known.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// When the rating was last written (RFC 3339). `None` for records
    /// upgraded from the bare-integer form.
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl RatingRecord {
    /// Create a record.
    pub fn new(rating: Rating, title: impl Into<String>) -> Self {
        Self {
            rating,
            title: title.into(),
            imdb_id: None,
            last_updated: None,
        }
    }

    /// Set the IMDb id.
    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    /// Set the last-updated timestamp.
    pub fn with_last_updated(mut self, timestamp: impl Into<String>) -> Self {
        self.last_updated = Some(timestamp.into());
        self
    }
}

/// A record in either of the shapes found in storage.
///
/// Older data stored a bare integer per key. Reads accept both shapes and
/// normalize them with [`StoredRating::normalize`]; writes only ever produce
/// [`RatingRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredRating {
    /// Bare integer rating.
    Legacy(Rating),
    /// Full record.
    Full(RatingRecord),
}

impl StoredRating {
    /// Convert into the canonical record. The key stands in for a missing or
    /// blank title.
    pub fn normalize(self, key: &RecordKey) -> RatingRecord {
        match self {
            StoredRating::Legacy(rating) => RatingRecord::new(rating, key.as_str()),
            StoredRating::Full(mut record) => {
                if record.title.trim().is_empty() {
                    record.title = key.as_str().to_string();
                }
                record
            }
        }
    }
}

/// A full set of ratings keyed by [`RecordKey`].
pub type RatingMap = BTreeMap<RecordKey, RatingRecord>;

/// The movie a rating is being written for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieInfo {
    /// Display title.
    pub title: String,
    /// IMDb id when known.
    pub imdb_id: Option<String>,
}

impl MovieInfo {
    /// A movie known only by title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            imdb_id: None,
        }
    }

    /// Attach an IMDb id.
    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    /// The key this movie's rating is stored under.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::for_movie(&self.title, self.imdb_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_key_prefers_imdb_id() {
        assert_eq!(
            RecordKey::for_movie("Matrix", Some("tt0133093")).as_str(),
            "tt0133093"
        );
        assert_eq!(RecordKey::for_movie("Matrix", None).as_str(), "Matrix");
        assert_eq!(RecordKey::for_movie("Matrix", Some("  ")).as_str(), "Matrix");
    }

    #[test]
    fn test_rating_range() {
        assert!(Rating::new(0).is_ok());
        assert!(Rating::new(10).is_ok());
        assert!(Rating::new(11).is_err());
        assert!(Rating::try_from(-1).is_err());
        assert!(!Rating::UNRATED.is_rated());
    }

    #[test]
    fn test_rating_from_json_rejects_fractions() {
        assert_eq!(Rating::from_json(&json!(7)).map(Rating::value), Some(7));
        assert!(Rating::from_json(&json!(3.5)).is_none());
        assert!(Rating::from_json(&json!("7")).is_none());
        assert!(Rating::from_json(&json!(11)).is_none());
    }

    #[test]
    fn test_stored_rating_shapes() {
        let key = RecordKey::new("Movie X");

        let legacy: StoredRating = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(legacy, StoredRating::Legacy(Rating(7)));
        let record = legacy.normalize(&key);
        assert_eq!(record.rating.value(), 7);
        assert_eq!(record.title, "Movie X");
        assert!(record.last_updated.is_none());

        let full: StoredRating = serde_json::from_value(json!({
            "rating": 8,
            "title": "Matrix",
            "imdbId": "tt0133093",
            "lastUpdated": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let record = full.normalize(&key);
        assert_eq!(record.title, "Matrix");
        assert_eq!(record.imdb_id.as_deref(), Some("tt0133093"));
    }

    #[test]
    fn test_stored_rating_rejects_out_of_range() {
        assert!(serde_json::from_value::<StoredRating>(json!(12)).is_err());
        assert!(serde_json::from_value::<StoredRating>(json!({"rating": -1, "title": "X"})).is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = RatingRecord::new(Rating(8), "Matrix")
            .with_imdb_id("tt0133093")
            .with_last_updated("2024-01-01T00:00:00.000Z");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "rating": 8,
                "title": "Matrix",
                "imdbId": "tt0133093",
                "lastUpdated": "2024-01-01T00:00:00.000Z"
            })
        );
    }
}
