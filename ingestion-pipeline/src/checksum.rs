//! Order-independent content fingerprinting used to decide create, update,
//! or skip on re-ingestion.

use common::storage::types::measure::StarterPackMeasure;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// Canonical serialization: object keys sorted lexicographically at every
/// depth, arrays kept in their given order, scalars as plain JSON. Two
/// values that differ only in object key order stringify identically.
pub fn stable_stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        Value::Array(elements) => {
            let inner: Vec<String> = elements.iter().map(stable_stringify).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let entries: Vec<String> = keys
                .iter()
                .filter_map(|key| {
                    map.get(*key).map(|entry| {
                        format!("{}:{}", Value::String((*key).clone()), stable_stringify(entry))
                    })
                })
                .collect();
            format!("{{{}}}", entries.join(","))
        }
    }
}

/// SHA-256 fingerprint over an item's meaningful content: title, slug,
/// content type, section texts in order, measure (starter-pack items only),
/// and tags. Tags are pre-sorted so tag order never affects the digest;
/// section order and content do.
pub fn content_checksum(
    title: &str,
    slug: &str,
    content_type: &str,
    section_texts: &[String],
    measure: Option<&StarterPackMeasure>,
    tags: &[String],
) -> String {
    let mut sorted_tags = tags.to_vec();
    sorted_tags.sort();

    let measure_value = match measure {
        Some(measure) => json!(measure),
        None => Value::Null,
    };
    let payload = json!({
        "title": title,
        "slug": slug,
        "contentType": content_type,
        "sections": section_texts,
        "measure": measure_value,
        "tags": sorted_tags,
    });

    let mut hasher = Sha256::new();
    hasher.update(stable_stringify(&payload).as_bytes());
    format!("{:x}", hasher.finalize())
}
