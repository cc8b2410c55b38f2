//! Response shape passed through response interceptors.

use serde_json::Value;
use std::collections::HashMap;

/// Header set on every response unless the caller supplies its own value.
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContext {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body (serialized to JSON on delivery)
    pub body: Value,
}

impl ResponseContext {
    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
