//! Core domain types for records, requests and responses.

pub mod method;
pub mod record;
pub mod request;
pub mod response;
