//! Ordered request and response interceptor chains.

use crate::types::request::RequestContext;
use crate::types::response::ResponseContext;
use std::fmt;

/// Transform applied to every decoded request before routing.
pub type RequestInterceptor = Box<dyn Fn(RequestContext) -> RequestContext>;
/// Transform applied to every routed response before serialization.
pub type ResponseInterceptor = Box<dyn Fn(ResponseContext) -> ResponseContext>;

/// Two append-only interceptor lists, each applied as a left fold in
/// registration order: for `f` then `g` the result is `g(f(initial))`.
#[derive(Default)]
pub struct InterceptorPipeline {
    request: Vec<RequestInterceptor>,
    response: Vec<ResponseInterceptor>,
}

impl InterceptorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(RequestContext) -> RequestContext + 'static,
    {
        self.request.push(Box::new(interceptor));
    }

    pub fn add_response_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(ResponseContext) -> ResponseContext + 'static,
    {
        self.response.push(Box::new(interceptor));
    }

    pub fn apply_request(&self, request: RequestContext) -> RequestContext {
        self.request
            .iter()
            .fold(request, |acc, interceptor| interceptor(acc))
    }

    pub fn apply_response(&self, response: ResponseContext) -> ResponseContext {
        self.response
            .iter()
            .fold(response, |acc, interceptor| interceptor(acc))
    }

    pub fn request_len(&self) -> usize {
        self.request.len()
    }

    pub fn response_len(&self) -> usize {
        self.response.len()
    }
}

impl fmt::Debug for InterceptorPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorPipeline")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish()
    }
}
