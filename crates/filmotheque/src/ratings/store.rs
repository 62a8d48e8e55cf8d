//! The rating store: read-modify-write of one serialized rating map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{BackendError, FilmothequeError, Result};

use super::backend::KeyValueBackend;
use super::record::{MovieInfo, Rating, RatingMap, RatingRecord, RecordKey, StoredRating};

/// Rating counts for a set of movies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    /// Number of movies considered.
    pub total: usize,
    /// Movies with a rating above zero.
    pub rated: usize,
    /// Mean of the non-zero ratings to one decimal, `"0.0"` when none.
    pub average_rating: String,
}

impl RatingStats {
    fn from_ratings(total: usize, ratings: impl IntoIterator<Item = Rating>) -> Self {
        let (rated, sum) = ratings
            .into_iter()
            .filter(|r| r.is_rated())
            .fold((0usize, 0u64), |(n, sum), r| (n + 1, sum + u64::from(r.value())));

        Self {
            total,
            rated,
            average_rating: format_average(sum, rated),
        }
    }
}

/// Mean to one decimal, ties rounded up, computed in integer tenths so that
/// e.g. 7.25 renders as "7.3" rather than whatever the float rounds to.
fn format_average(sum: u64, count: usize) -> String {
    if count == 0 {
        return "0.0".to_string();
    }
    let count = count as u64;
    let tenths = (sum * 20 + count) / (count * 2);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Per-movie ratings persisted in a [`KeyValueBackend`].
///
/// The whole map lives under a single storage key. Every mutation reads the
/// map, changes it, and writes it back in one `set_item` call; the store keeps
/// no copy of its own, so the backend is always the source of truth.
///
/// Storage failures never escape: reads degrade to an empty map and writes
/// become logged no-ops, leaving whatever was stored before untouched.
///
/// # Example
///
/// ```
/// use filmotheque::{MemoryBackend, MovieInfo, Rating, RatingStore};
///
/// let mut store = RatingStore::new(MemoryBackend::new());
/// let movie = MovieInfo::new("Matrix").with_imdb_id("tt0133093");
/// let key = movie.record_key();
///
/// store.set(&key, Rating::new(8).unwrap(), &movie);
/// assert_eq!(store.get(&key), 8);
/// ```
pub struct RatingStore<B, C = SystemClock> {
    backend: B,
    clock: C,
    storage_key: String,
}

impl<B: KeyValueBackend> RatingStore<B, SystemClock> {
    /// Create a store over `backend` with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: KeyValueBackend, C: Clock> RatingStore<B, C> {
    /// Create a store that stamps records using `clock`.
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self::with_config(backend, clock, &StoreConfig::default())
    }

    /// Create a store with a custom configuration.
    pub fn with_config(backend: B, clock: C, config: &StoreConfig) -> Self {
        Self {
            backend,
            clock,
            storage_key: config.storage_key.clone(),
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The clock used for timestamps.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Rating for `key`, 0 when unrated.
    pub fn get(&self, key: &RecordKey) -> u8 {
        self.record(key).map(|r| r.rating.value()).unwrap_or(0)
    }

    /// Full record for `key`.
    pub fn record(&self, key: &RecordKey) -> Option<RatingRecord> {
        self.load().remove(key)
    }

    /// Insert or replace the rating for `key`.
    ///
    /// Returns whether the write reached storage. On failure the error is
    /// logged and the stored map is left as it was.
    pub fn set(&mut self, key: &RecordKey, rating: Rating, movie: &MovieInfo) -> bool {
        if key.is_empty() {
            log::warn!("Refusing to store a rating under an empty key");
            return false;
        }

        let title = if movie.title.trim().is_empty() {
            key.as_str().to_string()
        } else {
            movie.title.clone()
        };
        let record = RatingRecord {
            rating,
            title,
            imdb_id: movie.imdb_id.clone(),
            last_updated: Some(self.clock.timestamp()),
        };

        let (mut ratings, unreadable) = match self.load_for_update() {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Not saving rating for '{}', stored ratings could not be read: {}", key, e);
                return false;
            }
        };
        ratings.insert(key.clone(), record);

        match self.persist_with(&ratings, unreadable) {
            Ok(()) => {
                log::debug!("Rated '{}' {}/10", key, rating);
                true
            }
            Err(e) => {
                log::error!("Failed to save rating for '{}': {}", key, e);
                false
            }
        }
    }

    /// Drop the rating for `key`. Returns whether storage was updated.
    pub fn remove(&mut self, key: &RecordKey) -> bool {
        let (mut ratings, mut unreadable) = match self.load_for_update() {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Not removing rating for '{}', stored ratings could not be read: {}", key, e);
                return false;
            }
        };
        let removed = ratings.remove(key).is_some();
        let removed_unreadable = unreadable.remove(key.as_str()).is_some();
        if !removed && !removed_unreadable {
            return true;
        }

        match self.persist_with(&ratings, unreadable) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to remove rating for '{}': {}", key, e);
                false
            }
        }
    }

    /// Delete every rating. Irreversible; callers confirm with the user first.
    pub fn clear_all(&mut self) -> bool {
        match self.backend.remove_item(&self.storage_key) {
            Ok(()) => {
                log::info!("Cleared all ratings");
                true
            }
            Err(e) => {
                log::error!("Failed to clear ratings: {}", e);
                false
            }
        }
    }

    /// Owned copy of every rating.
    pub fn snapshot(&self) -> RatingMap {
        self.load()
    }

    /// Swap the whole map for `ratings` in a single write.
    ///
    /// Only pass data that has been through
    /// [`check_envelope`](crate::exchange::check_envelope) or was built from
    /// typed records.
    pub fn replace_all(&mut self, ratings: RatingMap) -> Result<()> {
        self.persist(&ratings)?;
        log::info!("Replaced ratings with {} records", ratings.len());
        Ok(())
    }

    /// Counts over the given table rows.
    ///
    /// `total` is the number of rows; a row counts as rated when its key has a
    /// non-zero rating.
    pub fn stats<'a>(&self, rows: impl IntoIterator<Item = &'a RecordKey>) -> RatingStats {
        let ratings = self.load();
        let mut total = 0;
        let values: Vec<Rating> = rows
            .into_iter()
            .inspect(|_| total += 1)
            .filter_map(|key| ratings.get(key).map(|r| r.rating))
            .collect();
        RatingStats::from_ratings(total, values)
    }

    /// Counts over everything in storage.
    pub fn stored_stats(&self) -> RatingStats {
        let ratings = self.load();
        RatingStats::from_ratings(ratings.len(), ratings.values().map(|r| r.rating))
    }

    /// Read and normalize the stored map, or an empty one if storage cannot
    /// be read.
    fn load(&self) -> RatingMap {
        match self.load_for_update() {
            Ok((ratings, _)) => ratings,
            Err(e) => {
                log::warn!("Ratings unavailable, continuing without them: {}", e);
                RatingMap::new()
            }
        }
    }

    /// Read the stored map for a read-modify-write.
    ///
    /// Fails if storage cannot be read, so callers never write over data they
    /// did not see. Entries that do not parse as ratings are returned raw in
    /// the second map and must be written back unchanged.
    fn load_for_update(&self) -> Result<(RatingMap, Map<String, Value>)> {
        let Some(raw) = self.backend.get_item(&self.storage_key)? else {
            return Ok((RatingMap::new(), Map::new()));
        };

        let entries = match serde_json::from_str::<Value>(&raw)? {
            Value::Object(entries) => entries,
            _ => {
                return Err(FilmothequeError::Storage(BackendError::Unavailable(
                    "stored ratings are not a JSON object".to_string(),
                )));
            }
        };

        let mut ratings = RatingMap::new();
        let mut unreadable = Map::new();
        for (raw_key, value) in entries {
            if raw_key.is_empty() {
                log::warn!("Ignoring stored rating with an empty key");
                unreadable.insert(raw_key, value);
                continue;
            }
            match serde_json::from_value::<StoredRating>(value.clone()) {
                Ok(stored) => {
                    let key = RecordKey::new(raw_key);
                    let record = stored.normalize(&key);
                    ratings.insert(key, record);
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable rating for '{}': {}", raw_key, e);
                    unreadable.insert(raw_key, value);
                }
            }
        }
        Ok((ratings, unreadable))
    }

    fn persist(&mut self, ratings: &RatingMap) -> Result<()> {
        self.persist_with(ratings, Map::new())
    }

    /// Write `ratings` together with raw entries carried over from storage.
    /// A record and a raw entry under the same key: the record wins.
    fn persist_with(&mut self, ratings: &RatingMap, unreadable: Map<String, Value>) -> Result<()> {
        let mut entries = unreadable;
        for (key, record) in ratings {
            entries.insert(key.as_str().to_string(), serde_json::to_value(record)?);
        }
        let serialized = serde_json::to_string(&Value::Object(entries))?;
        self.backend.set_item(&self.storage_key, &serialized)?;
        Ok(())
    }
}
