//! Request routing: resource matching and dispatch to collection operations.

use crate::query::{Query, QueryParams};
use crate::server::response::{build_response, list_status, ContentRange, CONTENT_RANGE, LOCATION};
use crate::server::ServerError;
use crate::store::{into_record, Collection, CollectionError, CollectionRegistry};
use crate::types::method::HttpMethod;
use crate::types::record::{identifier_from_segment, identifier_to_string, Record};
use crate::types::request::RequestContext;
use crate::types::response::ResponseContext;
use serde_json::Value;
use std::collections::HashMap;

/// Outcome of routing one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Deliver this response through the response pipeline
    Respond(ResponseContext),
    /// Identifier not found on an item route: bare `404`, no pipeline
    NotFound,
    /// No resource or method matched; leave the request to the transport
    Unhandled,
}

/// Route `request` to the first registered collection whose path matches.
pub fn dispatch(
    registry: &mut CollectionRegistry,
    request: &RequestContext,
) -> Result<Dispatch, ServerError> {
    let Some(matched) = registry.match_url(&request.url) else {
        return Ok(Dispatch::Unhandled);
    };
    let Some(method) = HttpMethod::parse(&request.method) else {
        return Ok(Dispatch::Unhandled);
    };
    tracing::trace!(
        collection = %matched.name,
        identifier = ?matched.identifier,
        method = %method,
        "Matched collection route"
    );
    let base_url = registry.base_url().trim_end_matches('/').to_string();
    let collection = registry
        .get_mut(&matched.name)
        .ok_or_else(|| ServerError::UnknownCollection {
            name: matched.name.clone(),
        })?;

    match matched.identifier {
        None => match method {
            HttpMethod::Get => list(collection, &request.params).map(Dispatch::Respond),
            HttpMethod::Post => {
                let record = body_record(request)?;
                let created = collection.add_one(record)?;
                let identifier = created
                    .get(collection.identifier_field())
                    .map(identifier_to_string)
                    .unwrap_or_default();
                let location = format!("{}/{}/{}", base_url, matched.name, identifier);
                let headers = HashMap::from([(LOCATION.to_string(), location)]);
                Ok(Dispatch::Respond(build_response(
                    201,
                    Value::Object(created),
                    headers,
                )))
            }
            _ => Ok(Dispatch::Unhandled),
        },
        Some(segment) => {
            let identifier = identifier_from_segment(&segment);
            let result = match method {
                HttpMethod::Get => collection.get_one(&identifier),
                HttpMethod::Put => {
                    if !collection.contains(&identifier) {
                        return Ok(Dispatch::NotFound);
                    }
                    let patch = body_record(request)?;
                    collection.update_one(&identifier, patch)
                }
                HttpMethod::Delete => collection.remove_one(&identifier),
                _ => return Ok(Dispatch::Unhandled),
            };
            item_outcome(result)
        }
    }
}

/// `GET` on a collection URL: filtered page with `Content-Range`.
fn list(collection: &Collection, params: &QueryParams) -> Result<ResponseContext, ServerError> {
    let query = Query::from_params(params)?;
    // windows never narrow the count
    let count = collection.get_count(&query);

    let (items, content_range, status) = if count == 0 {
        (Vec::new(), ContentRange::Empty, 200)
    } else {
        let items = collection.get_all(&query);
        let content_range = ContentRange::for_page(items.len(), count, query.range);
        let status = list_status(items.len(), count);
        (items, content_range, status)
    };

    let body = Value::Array(items.into_iter().map(Value::Object).collect());
    let headers = HashMap::from([(CONTENT_RANGE.to_string(), content_range.to_string())]);
    Ok(build_response(status, body, headers))
}

fn item_outcome(result: Result<Record, CollectionError>) -> Result<Dispatch, ServerError> {
    match result {
        Ok(record) => Ok(Dispatch::Respond(build_response(
            200,
            Value::Object(record),
            HashMap::new(),
        ))),
        Err(CollectionError::NotFound { .. }) => Ok(Dispatch::NotFound),
        Err(err) => Err(err.into()),
    }
}

fn body_record(request: &RequestContext) -> Result<Record, CollectionError> {
    into_record(request.json.clone().unwrap_or(Value::Null))
}
