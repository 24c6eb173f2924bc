//! Content hashing and identifiers via xxh3.
//!
//! Hashes are taken over canonical JSON: object keys sorted at every depth,
//! with the excluded field removed first.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;
use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

use super::types::BayesianFactPack;
use crate::priors::{DataTier, Region};

/// Recursively sort object keys.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// xxh3-64 of `value` serialized canonically without the field at
/// `exclude` (a key path, e.g. `["metadata", "hash"]`), as 16 lowercase hex digits.
pub fn canonical_hash<T: Serialize>(value: &T, exclude: &[&str]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_value(value)?;
    remove_path(&mut json, exclude);
    let bytes = serde_json::to_vec(&canonicalize(json))?;
    Ok(format!("{:016x}", xxh3_64(&bytes)))
}

fn remove_path(value: &mut Value, path: &[&str]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = value;
    for key in parents {
        let Some(next) = current.get_mut(*key) else {
            return;
        };
        current = next;
    }
    if let Value::Object(map) = current {
        map.remove(*last);
    }
}

/// Content hash of a fact pack; covers everything but the hash itself.
pub fn fact_pack_hash(pack: &BayesianFactPack) -> Result<String, serde_json::Error> {
    canonical_hash(pack, &["integrity", "content_hash"])
}

/// `<tier letter>-<grade>`, e.g. `R-A`.
pub fn classification_code(tier: DataTier, grade: char) -> String {
    format!("{}-{}", tier.letter(), grade)
}

/// Report id derived from the build inputs; a fixed timestamp reproduces it.
pub fn report_id(
    category: &str,
    regions: &[Region],
    target_price: f64,
    generated_at: &DateTime<Utc>,
) -> Uuid {
    let regions: Vec<&str> = regions.iter().map(|r| r.code()).collect();
    let seed = format!(
        "{}|{}|{}|{}",
        category,
        regions.join(","),
        target_price,
        generated_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    );
    Uuid::from_u128(xxh3_128(seed.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_canonicalize_sorts_nested_keys() {
        let v = canonicalize(json!({"b": {"z": 1, "a": 2}, "a": [{"y": 1, "x": 2}]}));
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"a":[{"x":2,"y":1}],"b":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn test_hash_excludes_field() {
        let a = canonical_hash(&json!({"x": 1, "hash": "one"}), &["hash"]).unwrap();
        let b = canonical_hash(&json!({"hash": "two", "x": 1}), &["hash"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_sensitive_to_content() {
        let a = canonical_hash(&json!({"x": 1}), &["hash"]).unwrap();
        let b = canonical_hash(&json!({"x": 2}), &["hash"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_excludes_nested_field() {
        let a = canonical_hash(&json!({"meta": {"hash": "a", "id": 1}}), &["meta", "hash"]).unwrap();
        let b = canonical_hash(&json!({"meta": {"id": 1}}), &["meta", "hash"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_id_deterministic() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        let a = report_id("HEALTH_SUPPLEMENTS", &[Region::SaudiArabia], 300.0, &ts);
        let b = report_id("HEALTH_SUPPLEMENTS", &[Region::SaudiArabia], 300.0, &ts);
        let c = report_id("HEALTH_SUPPLEMENTS", &[Region::Kuwait], 300.0, &ts);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_classification_code() {
        assert_eq!(classification_code(DataTier::Estimated, 'B'), "E-B");
    }
}
