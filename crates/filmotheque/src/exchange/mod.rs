//! Export and import of ratings.
//!
//! An export is an [`ExportEnvelope`]: the full rating map, metadata, and a
//! checksum over the ratings. Import runs in fixed steps and stops at the first
//! failure, leaving the stored ratings untouched:
//!
//! 1. the file must be declared as JSON and be at most 1 MiB;
//! 2. it must parse as JSON;
//! 3. it must pass [`check_envelope`] (shape, checksum, every record);
//! 4. the user must confirm the replacement.
//!
//! # Usage
//!
//! ```
//! use filmotheque::exchange::{export_ratings, import_ratings, ImportFile, ImportOutcome};
//! use filmotheque::{MemoryBackend, MovieInfo, Rating, RatingStore, StoreConfig};
//!
//! let config = StoreConfig::default();
//! let mut store = RatingStore::new(MemoryBackend::new());
//! let movie = MovieInfo::new("Matrix");
//! store.set(&movie.record_key(), Rating::new(8).unwrap(), &movie);
//!
//! let mut saved = Vec::new();
//! let mut sink = |_: &str, bytes: &[u8], _: &str| -> filmotheque::Result<()> {
//!     saved = bytes.to_vec();
//!     Ok(())
//! };
//! export_ratings(&store, &mut sink, &config).unwrap();
//!
//! let file = ImportFile::new("ratings.json", "application/json", saved);
//! let mut other = RatingStore::new(MemoryBackend::new());
//! let outcome = import_ratings(&mut other, &file, &mut |_: &str| true, &config).unwrap();
//! assert_eq!(outcome, ImportOutcome::Applied { records: 1 });
//! ```

mod envelope;
mod error;
mod export;
mod import;
mod validate;

pub use envelope::{ExportEnvelope, ExportMetadata, parse_envelope};
pub use error::ImportError;
pub use export::{
    DirectorySink, EXPORT_MIME_TYPE, ExportReceipt, FileSink, build_envelope, export_filename,
    export_ratings,
};
pub use import::{Confirm, ImportFile, ImportOutcome, ImportPreview, import_ratings, prepare_import};
pub use validate::{check_envelope, validate};
