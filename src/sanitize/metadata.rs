//! Recursive metadata cleaning
//!
//! Keys are reduced to `[A-Za-z0-9_-]`, strings lose script blocks and markup,
//! numbers and booleans pass through, nested maps recurse and anything else
//! (null) is dropped.

use super::strip_tags;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub type Metadata = Map<String, Value>;

static KEY_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]").expect("valid metadata key pattern"));

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script block pattern"));

/// Sanitize an arbitrary JSON value into a metadata map.
///
/// A non-object top-level value yields an empty map. Arrays are treated as
/// maps keyed by element index.
pub fn sanitize_metadata(metadata: &Value) -> Metadata {
    match metadata {
        Value::Object(map) => sanitize_entries(map.iter().map(|(k, v)| (k.clone(), v))),
        Value::Array(items) => sanitize_entries(
            items
                .iter()
                .enumerate()
                .map(|(index, v)| (index.to_string(), v)),
        ),
        _ => Metadata::new(),
    }
}

fn sanitize_entries<'a>(entries: impl Iterator<Item = (String, &'a Value)>) -> Metadata {
    let mut sanitized = Metadata::new();

    for (key, value) in entries {
        let clean_key = KEY_DISALLOWED_RE.replace_all(&key, "").into_owned();

        let clean_value = match value {
            Value::String(s) => Value::String(sanitize_text(s)),
            Value::Number(_) | Value::Bool(_) => value.clone(),
            Value::Object(_) | Value::Array(_) => Value::Object(sanitize_metadata(value)),
            Value::Null => continue,
        };

        sanitized.insert(clean_key, clean_value);
    }

    sanitized
}

fn sanitize_text(value: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_RE.replace_all(value, "");
    strip_tags(&without_scripts).trim().to_string()
}
