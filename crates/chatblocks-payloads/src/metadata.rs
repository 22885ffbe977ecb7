//! Private-metadata codec.
//!
//! A view's `private_metadata` is a single opaque string on the wire; by
//! convention it carries `key=value` pairs joined with `&`. The encoder
//! works over a sorted map so the output is deterministic.

use std::collections::BTreeMap;

/// Encode a sorted map as a `k=v&k=v` metadata string.
pub fn encode(entries: &BTreeMap<String, String>) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a `k=v&k=v` metadata string. Segments without a `=` are
/// skipped; a value may itself contain `=`.
pub fn decode(text: &str) -> BTreeMap<String, String> {
    text.split('&')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
