//! Record and identifier types.

use serde_json::{Map, Value};

/// Identifier field used when a collection does not configure its own.
pub const DEFAULT_IDENTIFIER: &str = "id";

/// A stored record: JSON object keyed by field name, in insertion order.
pub type Record = Map<String, Value>;

/// Convert a URL path segment into an identifier value.
///
/// Digit-only segments become JSON numbers so that `/books/2` addresses the record
/// with `"id": 2`. Anything else is kept as a string identifier.
pub fn identifier_from_segment(segment: &str) -> Value {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = segment.parse::<u64>() {
            return Value::from(n);
        }
    }
    Value::String(segment.to_owned())
}

/// Render an identifier for URLs and messages (strings are not quoted).
pub fn identifier_to_string(identifier: &Value) -> String {
    match identifier {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
