//! Integration tests for the rating store.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use serde_json::{Value, json};

use filmotheque::{
    BackendError, CatalogParser, FileBackend, FixedClock, KeyValueBackend, MemoryBackend, MovieInfo, Rating,
    RatingMap, RatingRecord, RatingStore, RecordKey,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn clock() -> FixedClock {
    FixedClock::at("2024-01-01T00:00:00Z").unwrap()
}

fn rating(value: u8) -> Rating {
    Rating::new(value).expect("valid rating")
}

fn matrix_record() -> RatingRecord {
    RatingRecord::new(rating(8), "Matrix")
        .with_imdb_id("tt0109098")
        .with_last_updated("2024-01-01T00:00:00Z")
}

// =============================================================================
// Store Behaviour
// =============================================================================

#[test]
fn test_set_is_idempotent() {
    let mut store = RatingStore::with_clock(MemoryBackend::new(), clock());
    let movie = MovieInfo::new("Heat");
    let key = movie.record_key();

    assert!(store.set(&key, rating(6), &movie));
    let first = store.stats([&key]);
    assert!(store.set(&key, rating(6), &movie));
    let second = store.stats([&key]);

    assert_eq!(store.get(&key), 6);
    assert_eq!(first, second);
    assert_eq!(second.rated, 1);
}

#[test]
fn test_replace_all_then_snapshot_roundtrip() {
    let mut ratings = RatingMap::new();
    ratings.insert(RecordKey::new("tt0109098"), matrix_record());
    ratings.insert(
        RecordKey::new("Heat"),
        RatingRecord::new(rating(0), "Heat").with_last_updated("2023-06-01T12:00:00.000Z"),
    );

    let mut store = RatingStore::with_clock(MemoryBackend::new(), clock());
    store.replace_all(ratings.clone()).expect("replace failed");

    assert_eq!(store.snapshot(), ratings);
}

#[test]
fn test_legacy_store_read_and_counted() {
    let backend = MemoryBackend::new().with_item("movieRatings", r#"{"Movie X": 7}"#);
    let store = RatingStore::with_clock(backend, clock());
    let key = RecordKey::new("Movie X");

    assert_eq!(store.get(&key), 7);

    let stats = store.stats([&key, &RecordKey::new("Movie Y")]);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.rated, 1);
    assert_eq!(stats.average_rating, "7.0");
}

#[test]
fn test_matrix_stats_against_table_rows() {
    let mut ratings = RatingMap::new();
    ratings.insert(RecordKey::new("tt0109098"), matrix_record());

    let mut store = RatingStore::with_clock(MemoryBackend::new(), clock());
    store.replace_all(ratings).expect("replace failed");

    let rows = vec![
        RecordKey::new("tt0109098"),
        RecordKey::new("Heat"),
        RecordKey::new("Alien"),
    ];
    let stats = store.stats(&rows);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.rated, 1);
    assert_eq!(stats.average_rating, "8.0");
}

#[test]
fn test_same_title_without_id_collides() {
    let mut store = RatingStore::with_clock(MemoryBackend::new(), clock());
    let original = MovieInfo::new("Solaris");
    let remake = MovieInfo::new("Solaris");

    store.set(&original.record_key(), rating(9), &original);
    store.set(&remake.record_key(), rating(5), &remake);

    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.get(&original.record_key()), 5);
}

/// Backend whose reads always fail while writes still go through.
struct WriteOnlyBackend {
    inner: MemoryBackend,
}

impl KeyValueBackend for WriteOnlyBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, BackendError> {
        Err(BackendError::Unavailable("read failed".to_string()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        self.inner.remove_item(key)
    }
}

fn stored_json<B: KeyValueBackend>(backend: &B) -> Value {
    let raw = backend
        .get_item("movieRatings")
        .expect("readable")
        .expect("present");
    serde_json::from_str(&raw).expect("valid json")
}

#[test]
fn test_set_keeps_unreadable_entries() {
    let backend = MemoryBackend::new().with_item(
        "movieRatings",
        r#"{"A": 4, "B": {"rating": 7, "title": "B", "imdbId": 12345}}"#,
    );
    let mut store = RatingStore::with_clock(backend, clock());
    assert_eq!(store.snapshot().len(), 1);

    let movie = MovieInfo::new("C");
    assert!(store.set(&movie.record_key(), rating(5), &movie));

    let stored = stored_json(store.backend());
    assert_eq!(stored["B"], json!({"rating": 7, "title": "B", "imdbId": 12345}));
    assert_eq!(stored["A"]["rating"], 4);
    assert_eq!(stored["C"]["rating"], 5);
}

#[test]
fn test_remove_keeps_other_unreadable_entries() {
    let backend = MemoryBackend::new()
        .with_item("movieRatings", r#"{"A": 4, "B": 42, "C": 6}"#);
    let mut store = RatingStore::with_clock(backend, clock());

    assert!(store.remove(&RecordKey::new("A")));

    let stored = stored_json(store.backend());
    assert_eq!(stored, json!({"B": 42, "C": {"rating": 6, "title": "C", "imdbId": null, "lastUpdated": null}}));
}

#[test]
fn test_failed_read_refuses_writes() {
    let inner = MemoryBackend::new().with_item("movieRatings", r#"{"A": 4, "B": 9}"#);
    let mut store = RatingStore::with_clock(WriteOnlyBackend { inner }, clock());

    assert!(store.snapshot().is_empty());

    let movie = MovieInfo::new("C");
    assert!(!store.set(&movie.record_key(), rating(5), &movie));
    assert!(!store.remove(&RecordKey::new("A")));

    let raw = store.backend().inner.get_item("movieRatings").unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"A": 4, "B": 9}"#));
}

// =============================================================================
// File Backend
// =============================================================================

#[test]
fn test_file_backed_store_persists() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(".filmotheque").join("storage.json");

    {
        let mut store = RatingStore::with_clock(FileBackend::new(&path), clock());
        let movie = MovieInfo::new("Matrix").with_imdb_id("tt0133093");
        assert!(store.set(&movie.record_key(), rating(9), &movie));
    }

    let store = RatingStore::with_clock(FileBackend::new(&path), clock());
    assert_eq!(store.get(&RecordKey::new("tt0133093")), 9);

    let raw = store
        .backend()
        .get_item("movieRatings")
        .expect("readable")
        .expect("present");
    assert!(raw.contains("\"lastUpdated\":\"2024-01-01T00:00:00.000Z\""));
}

#[test]
fn test_corrupt_storage_file_degrades() {
    let file = create_test_file("{ this is not json");
    let mut store = RatingStore::new(FileBackend::new(file.path()));

    assert!(store.snapshot().is_empty());

    // Reads of the backing file fail, so writes are refused rather than
    // clobbering it.
    let movie = MovieInfo::new("Heat");
    assert!(!store.set(&movie.record_key(), rating(5), &movie));
    let contents = std::fs::read_to_string(file.path()).expect("readable");
    assert_eq!(contents, "{ this is not json");
}

// =============================================================================
// Catalog Integration
// =============================================================================

#[test]
fn test_catalog_rows_drive_stats() {
    let file = create_test_file(
        "title\tyear\timdb\n\
         Matrix\t1999\thttps://www.imdb.com/title/tt0133093/\n\
         Heat\t1995\t\n\
         Alien\t1979\thttps://www.imdb.com/title/tt0078748/\n",
    );
    let catalog = CatalogParser::new().parse_file(file.path()).expect("parse");

    let mut store = RatingStore::with_clock(MemoryBackend::new(), clock());
    for row in catalog.rows() {
        let value = match row.title() {
            "Matrix" => 9,
            "Heat" => 8,
            _ => 0,
        };
        store.set(&row.record_key(), rating(value), &row.movie_info());
    }

    let stats = store.stats(&catalog.record_keys());
    assert_eq!(stats.total, 3);
    assert_eq!(stats.rated, 2);
    assert_eq!(stats.average_rating, "8.5");

    assert_eq!(store.get(&RecordKey::new("tt0133093")), 9);
    assert_eq!(store.get(&RecordKey::new("Heat")), 8);
}
