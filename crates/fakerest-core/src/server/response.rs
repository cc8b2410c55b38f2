//! Response assembly: default headers, `Content-Range` and list status.

use crate::query::Window;
use crate::server::ServerError;
use crate::types::response::{ResponseContext, CONTENT_TYPE, JSON_CONTENT_TYPE};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub const CONTENT_RANGE: &str = "Content-Range";
pub const LOCATION: &str = "Location";

/// Build a response, layering caller headers over the JSON `Content-Type` default.
pub fn build_response(
    status: u16,
    body: Value,
    headers: HashMap<String, String>,
) -> ResponseContext {
    let mut all_headers = headers;
    let has_content_type = all_headers
        .keys()
        .any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE));
    if !has_content_type {
        all_headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
    }
    ResponseContext {
        status,
        headers: all_headers,
        body,
    }
}

/// Serialize a response body to JSON text.
pub fn serialize_body(body: &Value) -> Result<String, ServerError> {
    serde_json::to_string(body).map_err(ServerError::Serialize)
}

/// Value of the `Content-Range` header of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRange {
    /// Filtered count is zero: `items */0`
    Empty,
    /// `items {first}-{last}/{count}`
    Items { first: i64, last: i64, count: usize },
}

impl ContentRange {
    /// Range reported for `returned` items out of `count` filtered records.
    ///
    /// Without a requested range the window starts at `0`; with one it starts at
    /// the requested start and its end is clipped to what was actually returned.
    pub fn for_page(returned: usize, count: usize, range: Option<Window>) -> Self {
        if count == 0 {
            return ContentRange::Empty;
        }
        let returned = returned as i64;
        match range {
            Some(range) => ContentRange::Items {
                first: range.start,
                last: (returned - 1).saturating_add(range.start).min(range.end),
                count,
            },
            None => ContentRange::Items {
                first: 0,
                last: returned - 1,
                count,
            },
        }
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRange::Empty => write!(f, "items */0"),
            ContentRange::Items { first, last, count } => {
                write!(f, "items {}-{}/{}", first, last, count)
            }
        }
    }
}

/// `200` when the page holds every filtered record, `206` otherwise.
pub fn list_status(returned: usize, count: usize) -> u16 {
    if returned == count {
        200
    } else {
        206
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_build_response_defaults_content_type() {
        let response = build_response(200, json!([]), HashMap::new());
        assert_eq!(response.header(CONTENT_TYPE), Some(JSON_CONTENT_TYPE));
        assert_eq!(response.status, 200);
    }

    #[rstest]
    #[case("Content-Type")]
    #[case("content-type")]
    fn test_build_response_keeps_caller_content_type(#[case] name: &str) {
        let headers = HashMap::from([(name.to_string(), "text/plain".to_string())]);
        let response = build_response(200, json!("hi"), headers);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header(CONTENT_TYPE), Some("text/plain"));
    }

    #[rstest]
    fn test_build_response_layers_caller_headers() {
        let headers = HashMap::from([(LOCATION.to_string(), "/books/3".to_string())]);
        let response = build_response(201, json!({"id": 3}), headers);
        assert_eq!(response.header(LOCATION), Some("/books/3"));
        assert_eq!(response.header(CONTENT_TYPE), Some(JSON_CONTENT_TYPE));
    }

    #[rstest]
    #[case(11, 11, None, "items 0-10/11", 200)]
    #[case(5, 11, Some(Window::new(0, 4)), "items 0-4/11", 206)]
    #[case(5, 11, Some(Window::new(5, 9)), "items 5-9/11", 206)]
    #[case(1, 11, Some(Window::new(10, 14)), "items 10-10/11", 206)]
    #[case(2, 2, None, "items 0-1/2", 200)]
    #[case(1, 2, Some(Window::new(1, 1)), "items 1-1/2", 206)]
    #[case(0, 0, None, "items */0", 200)]
    #[case(0, 0, Some(Window::new(0, 9)), "items */0", 200)]
    #[case(0, 11, Some(Window::new(i64::MIN, -1)), "items -9223372036854775808--9223372036854775808/11", 206)]
    #[case(11, 11, Some(Window::new(i64::MAX - 1, i64::MAX)), "items 9223372036854775806-9223372036854775807/11", 200)]
    fn test_content_range_and_status(
        #[case] returned: usize,
        #[case] count: usize,
        #[case] range: Option<Window>,
        #[case] expected_range: &str,
        #[case] expected_status: u16,
    ) {
        assert_eq!(
            ContentRange::for_page(returned, count, range).to_string(),
            expected_range
        );
        assert_eq!(list_status(returned, count), expected_status);
    }

    #[rstest]
    fn test_serialize_body_preserves_field_order() {
        let body = json!({"name": "baz", "id": 3});
        assert_eq!(
            serialize_body(&body).expect("Should serialize"),
            "{\"name\":\"baz\",\"id\":3}"
        );
    }
}
