//! Per-movie ratings and their persistence.
//!
//! Ratings live in a single storage entry, `movieRatings`, holding a JSON
//! object that maps each movie's [`RecordKey`] to a [`RatingRecord`]:
//!
//! ```text
//! movieRatings = {
//!   "tt0133093": {"rating": 8, "title": "Matrix", "imdbId": "tt0133093", "lastUpdated": "..."},
//!   "Movie X": 7
//! }
//! ```
//!
//! Bare integers like `"Movie X": 7` come from older data; they are read as
//! records and rewritten in full on the next write.

mod backend;
mod record;
mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use record::{MAX_RATING, MovieInfo, Rating, RatingMap, RatingRecord, RecordKey, StoredRating};
pub use store::{RatingStats, RatingStore};
