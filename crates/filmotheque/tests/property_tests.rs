//! Property-based tests for the store and the exchange format.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p filmotheque --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p filmotheque --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{Value, json};

use filmotheque::checksum::checksum_value;
use filmotheque::exchange::validate;
use filmotheque::{
    FixedClock, MemoryBackend, MovieInfo, Rating, RatingMap, RatingRecord, RatingStore, RecordKey,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 :'éè-]{0,39}"
}

fn imdb_id() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("tt[0-9]{7,8}")
}

fn rating() -> impl Strategy<Value = Rating> {
    (0u8..=10).prop_map(|v| Rating::new(v).unwrap())
}

fn record() -> impl Strategy<Value = RatingRecord> {
    (rating(), title(), imdb_id()).prop_map(|(rating, title, imdb_id)| RatingRecord {
        rating,
        title,
        imdb_id,
        last_updated: Some("2024-01-01T00:00:00.000Z".to_string()),
    })
}

fn rating_map() -> impl Strategy<Value = RatingMap> {
    proptest::collection::btree_map("[A-Za-z0-9]{1,12}".prop_map(RecordKey::new), record(), 0..20)
}

fn envelope(ratings: &Value) -> Value {
    json!({
        "ratings": ratings,
        "metadata": {"exportDate": "2024-01-01T00:00:00.000Z", "version": "1.0"},
        "checksum": checksum_value(ratings)
    })
}

fn single(key: &str, record: Value) -> Value {
    let mut ratings = serde_json::Map::new();
    ratings.insert(key.to_string(), record);
    Value::Object(ratings)
}

fn store() -> RatingStore<MemoryBackend, FixedClock> {
    RatingStore::with_clock(MemoryBackend::new(), FixedClock::at("2024-01-01T00:00:00Z").unwrap())
}

// =============================================================================
// Validator Properties
// =============================================================================

proptest! {
    #[test]
    fn valid_record_always_validates(key in "[A-Za-z0-9]{1,12}", record in record()) {
        let ratings = single(&key, serde_json::to_value(&record).unwrap());
        prop_assert!(validate(&envelope(&ratings)));
    }

    #[test]
    fn legacy_ratings_in_range_validate(key in "[A-Za-z0-9]{1,12}", value in 0i64..=10) {
        let ratings = single(&key, json!(value));
        prop_assert!(validate(&envelope(&ratings)));
    }

    #[test]
    fn out_of_range_ratings_rejected(value in prop_oneof![11i64..1000, -1000i64..0]) {
        let ratings = json!({ "X": {"rating": value, "title": "X"} });
        prop_assert!(!validate(&envelope(&ratings)));
    }

    #[test]
    fn fractional_ratings_rejected(whole in 0u8..10) {
        let ratings = json!({ "X": {"rating": f64::from(whole) + 0.5, "title": "X"} });
        prop_assert!(!validate(&envelope(&ratings)));
    }

    #[test]
    fn single_character_tamper_detected(
        record in record(),
        index in any::<prop::sample::Index>(),
        replacement in "[a-z]",
    ) {
        let ratings = json!({ "K": serde_json::to_value(&record).unwrap() });
        let original = envelope(&ratings);

        // Change one character of the title, keeping the old checksum.
        let mut chars: Vec<char> = record.title.chars().collect();
        let i = index.index(chars.len());
        let new_char = replacement.chars().next().unwrap();
        prop_assume!(chars[i] != new_char);
        chars[i] = new_char;

        let mut tampered = original.clone();
        tampered["ratings"]["K"]["title"] = json!(chars.into_iter().collect::<String>());
        prop_assert!(!validate(&tampered));
    }
}

// =============================================================================
// Store Properties
// =============================================================================

proptest! {
    #[test]
    fn replace_all_then_snapshot_is_identity(ratings in rating_map()) {
        let mut store = store();
        store.replace_all(ratings.clone()).unwrap();
        prop_assert_eq!(store.snapshot(), ratings);
    }

    #[test]
    fn set_twice_is_idempotent(title in title(), value in rating()) {
        let mut store = store();
        let movie = MovieInfo::new(title);
        let key = movie.record_key();
        prop_assume!(!key.is_empty());

        store.set(&key, value, &movie);
        let once = (store.get(&key), store.stats([&key]));
        store.set(&key, value, &movie);
        let twice = (store.get(&key), store.stats([&key]));

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn stats_never_exceed_total(ratings in rating_map()) {
        let mut store = store();
        store.replace_all(ratings.clone()).unwrap();
        let stats = store.stats(ratings.keys());
        prop_assert_eq!(stats.total, ratings.len());
        prop_assert!(stats.rated <= stats.total);
        let average: f64 = stats.average_rating.parse().unwrap();
        prop_assert!((0.0..=10.0).contains(&average));
    }
}
