//! Decoded request passed through request interceptors and the router.

use crate::query::QueryParams;
use serde_json::Value;
use std::collections::HashMap;

/// Request as seen by interceptors and the router.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestContext {
    /// HTTP method as delivered by the transport
    pub method: String,
    /// Request URL (path + query string)
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub body: Option<String>,
    /// Decoded query parameters
    pub params: QueryParams,
    /// Parsed body, present only when the body is valid JSON
    pub json: Option<Value>,
}

impl RequestContext {
    /// Query string part of the URL, without the leading `?`.
    pub fn query_string(&self) -> &str {
        self.url.split_once('?').map(|(_, q)| q).unwrap_or("")
    }
}
