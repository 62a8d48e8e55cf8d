//! Checksums for exported rating data.
//!
//! The checksum is a 32-bit rolling hash over a canonical JSON rendering of a
//! value. It detects accidental corruption and casual hand edits of an export
//! file. It is **not** a security mechanism: anyone can recompute it, so it
//! authenticates nothing.
//!
//! Export and validation must both go through [`canonical_json`]; hashing any
//! other rendering of the same data will produce a different checksum.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Render a value as canonical JSON.
///
/// The value is first converted to a [`serde_json::Value`] tree, whose object
/// maps keep their keys sorted, and then serialized without whitespace. Two
/// structurally-equal values therefore render identically no matter the order
/// their fields or entries were inserted in.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let tree = serde_json::to_value(value)?;
    Ok(canonical_value(&tree))
}

/// Canonical rendering of an already-parsed JSON tree.
pub fn canonical_value(value: &Value) -> String {
    sorted(value).to_string()
}

/// Rebuild a tree with every object's keys inserted in sorted order.
///
/// Holds even when serde_json's `preserve_order` feature is enabled somewhere
/// in the dependency graph.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Hash a string into 8 lowercase hex digits.
///
/// `h = h * 31 + unit` over UTF-16 code units, wrapping at 32 bits.
pub fn hash_str(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
    format!("{:08x}", hash)
}

/// Checksum of a serializable value.
pub fn checksum<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(hash_str(&canonical_json(value)?))
}

/// Checksum of a parsed JSON tree.
pub fn checksum_value(value: &Value) -> String {
    hash_str(&canonical_value(value))
}
