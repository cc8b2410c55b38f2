//! Query string decoding into flags, strings and embedded JSON.

use crate::query::QueryError;
use serde_json::Value;
use std::collections::HashMap;

/// Decoded value of a single query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Plain `key=value` pair
    Text(String),
    /// Bare `key` without `=`
    Flag(bool),
    /// Value starting with `[` or `{`, parsed as JSON
    Json(Value),
}

impl QueryValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            QueryValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric view of the value, parsing text values such as `_start=10`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Text(s) => s.trim().parse().ok(),
            QueryValue::Json(v) => v.as_i64(),
            QueryValue::Flag(_) => None,
        }
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => QueryValue::Text(s),
            Value::Bool(b) => QueryValue::Flag(b),
            other => QueryValue::Json(other),
        }
    }
}

/// Decoded query parameters keyed by parameter name.
pub type QueryParams = HashMap<String, QueryValue>;

/// Decode a raw query string (without the leading `?`).
///
/// Pairs are separated by `&` and split on the first `=`; keys and values are
/// percent-decoded separately and keys are trimmed. A bare key becomes
/// [`QueryValue::Flag`]`(true)`, a value starting with `[` or `{` is parsed as JSON
/// and a malformed JSON value fails the whole decode.
pub fn decode_query_string(query_str: &str) -> Result<QueryParams, QueryError> {
    let mut params = QueryParams::new();

    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (pair, None),
        };
        let key = percent_decode(raw_key).trim().to_string();
        if key.is_empty() {
            continue;
        }

        let value = match raw_value {
            None => QueryValue::Flag(true),
            Some(raw) => {
                let decoded = percent_decode(raw);
                if decoded.starts_with('[') || decoded.starts_with('{') {
                    let json = serde_json::from_str(&decoded).map_err(|source| {
                        QueryError::Json {
                            key: key.clone(),
                            source,
                        }
                    })?;
                    QueryValue::Json(json)
                } else {
                    QueryValue::Text(decoded)
                }
            }
        };

        params.insert(key, value);
    }

    Ok(params)
}

fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
