//! Declarative endpoint descriptions.
//!
//! An API is usually modelled as an enum with one variant per call, with
//! `Endpoint` implemented by matching on `self`. Only `path` is required;
//! everything else falls back to a plain `GET` with no headers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::NetworkError;
use crate::http::HttpMethod;

/// Header name to value. A `None` value means "do not send this header".
pub type Headers = BTreeMap<String, Option<String>>;

/// Body of a request, or the parameters that stand in for one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Plain,

    /// Sent as a JSON object with `Content-Type: application/json`.
    Encodable(Map<String, Value>),

    /// Replaces the URL's query string. `null` entries are dropped.
    QueryParameter(Map<String, Value>),
}

impl RequestBody {
    /// Build an `Encodable` body from any value that serializes to a JSON object.
    pub fn encodable_from<T: Serialize + ?Sized>(value: &T) -> Result<Self, NetworkError> {
        to_object(value).map(RequestBody::Encodable)
    }

    /// Build a `QueryParameter` body from any value that serializes to a JSON object.
    pub fn query_from<T: Serialize + ?Sized>(value: &T) -> Result<Self, NetworkError> {
        to_object(value).map(RequestBody::QueryParameter)
    }
}

fn to_object<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>, NetworkError> {
    match serde_json::to_value(value).map_err(|e| NetworkError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(NetworkError::Serialization(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A single API call.
///
/// The URL is `base_url().unwrap_or(provider default) + path()`; no slash is
/// inserted between the two.
pub trait Endpoint {
    /// Overrides the provider's base URL for this endpoint.
    fn base_url(&self) -> Option<String> {
        None
    }

    fn path(&self) -> String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn headers(&self) -> Headers {
        Headers::new()
    }

    fn body(&self) -> RequestBody {
        RequestBody::Plain
    }
}
