//! Structural and integrity checks for imported envelopes.
//!
//! Validation is all-or-nothing: one bad record rejects the whole file.

use serde_json::{Map, Value};

use crate::checksum::checksum_value;
use crate::ratings::Rating;

use super::error::ImportError;

/// Whether `envelope` may be imported.
pub fn validate(envelope: &Value) -> bool {
    check_envelope(envelope).is_ok()
}

/// Check an envelope, reporting the first problem found.
pub fn check_envelope(envelope: &Value) -> Result<(), ImportError> {
    let envelope = envelope
        .as_object()
        .ok_or_else(|| schema("the file must contain a JSON object"))?;

    let ratings = envelope
        .get("ratings")
        .ok_or_else(|| schema("missing 'ratings'"))?;
    let ratings_map = ratings
        .as_object()
        .ok_or_else(|| schema("'ratings' must be an object"))?;

    let metadata = envelope
        .get("metadata")
        .ok_or_else(|| schema("missing 'metadata'"))?
        .as_object()
        .ok_or_else(|| schema("'metadata' must be an object"))?;
    check_metadata(metadata)?;

    let expected = envelope
        .get("checksum")
        .ok_or_else(|| schema("missing 'checksum'"))?
        .as_str()
        .ok_or_else(|| schema("'checksum' must be a string"))?;

    let actual = checksum_value(ratings);
    if actual != expected {
        return Err(ImportError::IntegrityMismatch {
            expected: expected.to_string(),
            actual,
        });
    }

    for (key, record) in ratings_map {
        if key.is_empty() {
            return Err(schema("rating keys must be non-empty strings"));
        }
        check_record(record).map_err(|reason| schema(format!("rating '{}': {}", key, reason)))?;
    }

    Ok(())
}

fn check_metadata(metadata: &Map<String, Value>) -> Result<(), ImportError> {
    for field in ["exportDate", "version"] {
        match metadata.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(schema(format!("'metadata.{}' must be a string", field))),
            None => return Err(schema(format!("missing 'metadata.{}'", field))),
        }
    }
    Ok(())
}

/// Check one record in either the bare-integer or the object form.
fn check_record(record: &Value) -> Result<(), String> {
    match record {
        Value::Number(_) => check_rating(record),
        Value::Object(fields) => {
            let rating = fields.get("rating").ok_or("missing 'rating'")?;
            check_rating(rating)?;

            match fields.get("title") {
                Some(Value::String(title)) if !title.is_empty() => {}
                Some(Value::String(_)) => return Err("'title' must not be empty".to_string()),
                Some(_) => return Err("'title' must be a string".to_string()),
                None => return Err("missing 'title'".to_string()),
            }

            for field in ["imdbId", "lastUpdated"] {
                match fields.get(field) {
                    None | Some(Value::Null) | Some(Value::String(_)) => {}
                    Some(_) => return Err(format!("'{}' must be a string", field)),
                }
            }
            Ok(())
        }
        _ => Err("must be a number or an object".to_string()),
    }
}

fn check_rating(value: &Value) -> Result<(), String> {
    match Rating::from_json(value) {
        Some(_) => Ok(()),
        None => Err(format!("rating {} is not an integer from 0 to 10", value)),
    }
}

fn schema(reason: impl Into<String>) -> ImportError {
    ImportError::SchemaViolation(reason.into())
}
