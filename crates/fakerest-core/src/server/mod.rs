//! Fake REST server: decoding, routing and response delivery.
//!
//! [`FakeServer`] owns its collections and interceptors. For every request it
//! decodes the query string and JSON body, folds the request interceptors,
//! routes to a collection operation and delivers the response through the
//! response interceptors to the host [`Exchange`].

mod error;
mod exchange;
mod interceptors;
pub mod response;
pub mod router;

pub use error::ServerError;
pub use exchange::{DeliveredResponse, Exchange, FakeRequest};
pub use interceptors::{InterceptorPipeline, RequestInterceptor, ResponseInterceptor};

use crate::config::ServerConfig;
use crate::query::{decode_query_string, Query};
use crate::server::response::serialize_body;
use crate::server::router::{dispatch, Dispatch};
use crate::store::{into_record, Collection, CollectionError, CollectionRegistry};
use crate::types::record::{Record, DEFAULT_IDENTIFIER};
use crate::types::request::RequestContext;
use crate::types::response::ResponseContext;
use serde_json::Value;
use std::collections::HashMap;

/// In-memory REST backend answering requests from named collections.
#[derive(Debug, Default)]
pub struct FakeServer {
    /// Collections by resource name, in registration order
    registry: CollectionRegistry,
    /// Request and response interceptors
    interceptors: InterceptorPipeline,
    /// Emit one diagnostic event per delivered response
    logging_enabled: bool,
}

impl FakeServer {
    /// Create a server whose resource URLs start with `base_url` (may be empty).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            registry: CollectionRegistry::new(base_url),
            interceptors: InterceptorPipeline::new(),
            logging_enabled: false,
        }
    }

    /// Build a server from configuration, registering collections in order.
    pub fn from_config(config: ServerConfig) -> Result<Self, CollectionError> {
        let mut server = Self::new(config.base_url);
        server.logging_enabled = config.logging;
        for collection in config.collections {
            let seeded = Collection::with_records(collection.records, collection.identifier)?;
            server.add_collection(&collection.name, seeded)?;
        }
        Ok(server)
    }

    pub fn base_url(&self) -> &str {
        self.registry.base_url()
    }

    /// Register several collections at once, all using the `id` identifier field.
    pub fn init<I, K, R>(&mut self, data: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: IntoIterator<Item = Value>,
    {
        for (name, records) in data {
            let collection = Collection::with_records(records, DEFAULT_IDENTIFIER)?;
            self.add_collection(name.as_ref(), collection)?;
        }
        Ok(())
    }

    pub fn toggle_logging(&mut self) {
        self.logging_enabled = !self.logging_enabled;
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Register `collection` under `name`, returning the collection it replaced.
    pub fn add_collection(
        &mut self,
        name: &str,
        collection: Collection,
    ) -> Result<Option<Collection>, CollectionError> {
        self.registry.insert(name, collection)
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.registry.get(name)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.registry.get_mut(name)
    }

    /// Registered resource names in registration order.
    pub fn collection_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    pub fn add_request_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(RequestContext) -> RequestContext + 'static,
    {
        self.interceptors.add_request_interceptor(interceptor);
    }

    pub fn add_response_interceptor<F>(&mut self, interceptor: F)
    where
        F: Fn(ResponseContext) -> ResponseContext + 'static,
    {
        self.interceptors.add_response_interceptor(interceptor);
    }

    pub fn get_count(&self, name: &str, query: &Query) -> Result<usize, ServerError> {
        Ok(self.lookup(name)?.get_count(query))
    }

    pub fn get_all(&self, name: &str, query: &Query) -> Result<Vec<Record>, ServerError> {
        Ok(self.lookup(name)?.get_all(query))
    }

    pub fn get_one(&self, name: &str, identifier: &Value) -> Result<Record, ServerError> {
        Ok(self.lookup(name)?.get_one(identifier)?)
    }

    /// Add a record; the value must be a JSON object.
    pub fn add_one(&mut self, name: &str, record: Value) -> Result<Record, ServerError> {
        let record = into_record(record)?;
        Ok(self.lookup_mut(name)?.add_one(record)?)
    }

    pub fn update_one(
        &mut self,
        name: &str,
        identifier: &Value,
        patch: Value,
    ) -> Result<Record, ServerError> {
        let patch = into_record(patch)?;
        Ok(self.lookup_mut(name)?.update_one(identifier, patch)?)
    }

    pub fn remove_one(&mut self, name: &str, identifier: &Value) -> Result<Record, ServerError> {
        Ok(self.lookup_mut(name)?.remove_one(identifier)?)
    }

    /// Decode an incoming request and fold it through the request interceptors.
    ///
    /// A body that is not valid JSON leaves [`RequestContext::json`] unset; a
    /// malformed JSON query value fails the request.
    pub fn decode<E: Exchange + ?Sized>(&self, exchange: &E) -> Result<RequestContext, ServerError> {
        let body = exchange.request_body().map(str::to_string);
        let json = body
            .as_deref()
            .filter(|b| !b.is_empty())
            .and_then(|b| serde_json::from_str(b).ok());

        let mut request = RequestContext {
            method: exchange.method().to_string(),
            url: exchange.url().to_string(),
            headers: exchange.request_headers().clone(),
            body,
            params: Default::default(),
            json,
        };
        request.params = decode_query_string(request.query_string())?;
        Ok(self.interceptors.apply_request(request))
    }

    /// Fold `response` through the response interceptors and deliver it.
    pub fn respond<E: Exchange + ?Sized>(
        &self,
        exchange: &mut E,
        request: &RequestContext,
        response: ResponseContext,
    ) -> Result<(), ServerError> {
        let response = self.interceptors.apply_response(response);
        self.log(request, &response);
        let body = serialize_body(&response.body)?;
        exchange.respond(response.status, response.headers, Some(body));
        Ok(())
    }

    /// Handle one request. Returns `true` when a response was delivered and
    /// `false` when no collection route matched, leaving the request untouched.
    pub fn handle<E: Exchange + ?Sized>(&mut self, exchange: &mut E) -> Result<bool, ServerError> {
        let request = self.decode(exchange)?;
        match dispatch(&mut self.registry, &request)? {
            Dispatch::Respond(response) => {
                self.respond(exchange, &request, response)?;
                Ok(true)
            }
            Dispatch::NotFound => {
                tracing::debug!(method = %request.method, url = %request.url, "No item with this identifier, responding 404");
                exchange.respond(404, HashMap::new(), None);
                Ok(true)
            }
            Dispatch::Unhandled => {
                tracing::trace!(method = %request.method, url = %request.url, "No collection route matched");
                Ok(false)
            }
        }
    }

    /// Handler closure bound to this server, for hosts that register callbacks.
    pub fn handler(&mut self) -> impl FnMut(&mut dyn Exchange) -> Result<bool, ServerError> + '_ {
        move |exchange: &mut dyn Exchange| self.handle(exchange)
    }

    fn log(&self, request: &RequestContext, response: &ResponseContext) {
        if !self.logging_enabled {
            return;
        }
        tracing::info!(
            method = %request.method,
            url = %request.url,
            request_headers = ?request.headers,
            request_body = ?request.body,
            status = response.status,
            response_headers = ?response.headers,
            response_body = %response.body,
            "FakeRest request handled"
        );
    }

    fn lookup(&self, name: &str) -> Result<&Collection, ServerError> {
        self.registry
            .get(name)
            .ok_or_else(|| ServerError::UnknownCollection {
                name: name.to_string(),
            })
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut Collection, ServerError> {
        self.registry
            .get_mut(name)
            .ok_or_else(|| ServerError::UnknownCollection {
                name: name.to_string(),
            })
    }
}
