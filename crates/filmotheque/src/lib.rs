//! Filmotheque: personal ratings for a browsable movie list.
//!
//! Each movie in the list can get a 0-10 star rating. Ratings are kept in a
//! local key-value store and can be exported to, and imported from, a JSON
//! file protected by a checksum.
//!
//! # Core Principles
//!
//! - **Storage never breaks the list**: if ratings cannot be read or written,
//!   the error is logged and the list keeps working without them
//! - **All-or-nothing imports**: one invalid record rejects the whole file,
//!   and nothing is replaced without confirmation
//! - **Backwards compatible reads**: bare-integer ratings from older data are
//!   read as full records
//!
//! # Example
//!
//! ```no_run
//! use filmotheque::{CatalogParser, FileBackend, RatingStore};
//!
//! let catalog = CatalogParser::new().parse_file("films.tsv").unwrap();
//! let store = RatingStore::new(FileBackend::new(".filmotheque/storage.json"));
//!
//! let stats = store.stats(&catalog.record_keys());
//! println!("{} of {} movies rated, average {}", stats.rated, stats.total, stats.average_rating);
//! ```

pub mod catalog;
pub mod checksum;
pub mod clock;
pub mod config;
pub mod error;
pub mod exchange;
pub mod media;
pub mod ratings;

pub use catalog::{Catalog, CatalogConfig, CatalogParser, MovieRow, SortOrder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use error::{BackendError, FilmothequeError, Result};
pub use exchange::{ExportEnvelope, ImportError, ImportFile, ImportOutcome};
pub use media::{MediaLibrary, Probe};
pub use ratings::{
    FileBackend, KeyValueBackend, MemoryBackend, MovieInfo, Rating, RatingMap, RatingRecord,
    RatingStats, RatingStore, RecordKey,
};
