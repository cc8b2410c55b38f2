//! Transport boundary: the request/response object supplied by the host.

use std::collections::HashMap;

/// Request delivered by the host transport, answered at most once through
/// [`Exchange::respond`].
pub trait Exchange {
    fn method(&self) -> &str;
    /// URL including the query string, if any
    fn url(&self) -> &str;
    fn request_headers(&self) -> &HashMap<String, String>;
    fn request_body(&self) -> Option<&str>;
    /// Deliver the response. The bare 404 passes empty headers and no body.
    fn respond(&mut self, status: u16, headers: HashMap<String, String>, body: Option<String>);
}

/// Response recorded by a [`FakeRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// In-process [`Exchange`] that records the delivered response.
///
/// Mirrors a fake XHR: [`FakeRequest::status`] stays `0` until the server
/// responds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeRequest {
    method: String,
    url: String,
    headers: HashMap<String, String>,
    body: Option<String>,
    response: Option<DeliveredResponse>,
}

impl FakeRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Delivered status, `0` when not responded.
    pub fn status(&self) -> u16 {
        self.response.as_ref().map(|r| r.status).unwrap_or(0)
    }

    pub fn is_responded(&self) -> bool {
        self.response.is_some()
    }

    pub fn response(&self) -> Option<&DeliveredResponse> {
        self.response.as_ref()
    }

    pub fn response_text(&self) -> Option<&str> {
        self.response.as_ref().and_then(|r| r.body.as_deref())
    }

    /// Response header by name, ignoring ASCII case.
    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.response.as_ref().and_then(|r| {
            r.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }
}

impl Exchange for FakeRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn request_headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn request_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn respond(&mut self, status: u16, headers: HashMap<String, String>, body: Option<String>) {
        self.response = Some(DeliveredResponse {
            status,
            headers,
            body,
        });
    }
}
