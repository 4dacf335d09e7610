//! Turns an [`Endpoint`] into an [`HttpRequest`].
//!
//! Pure and synchronous: no I/O, no logging. The provider calls this once per
//! call and reports any error itself.

use serde_json::Value;
use url::Url;

use crate::endpoint::{Endpoint, RequestBody};
use crate::error::NetworkError;
use crate::http::HttpRequest;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Build the request for `endpoint`, resolving its URL against `default_base_url`
/// unless the endpoint supplies its own base.
pub fn build_request<E: Endpoint + ?Sized>(
    endpoint: &E,
    default_base_url: &str,
) -> Result<HttpRequest, NetworkError> {
    let raw = match endpoint.base_url() {
        Some(base) => base + &endpoint.path(),
        None => format!("{default_base_url}{}", endpoint.path()),
    };
    let mut url = Url::parse(&raw).map_err(|e| NetworkError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    let mut headers: Vec<(String, String)> = endpoint
        .headers()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

    let mut body = None;
    match endpoint.body() {
        RequestBody::Plain => {}
        RequestBody::Encodable(params) => {
            let bytes = serde_json::to_vec(&params).map_err(|e| NetworkError::Serialization(e.to_string()))?;
            body = Some(bytes);
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE));
            headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        }
        RequestBody::QueryParameter(params) => {
            url.set_query(None);
            let pairs: Vec<(String, String)> = params
                .into_iter()
                .filter_map(|(name, value)| query_value(value).map(|v| (name, v)))
                .collect();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }
    }

    Ok(HttpRequest {
        method: endpoint.method(),
        url: url.into(),
        headers,
        body,
    })
}

/// Strings go out verbatim, everything else as its JSON text. `null` is dropped.
/// Pairs are form-encoded on the wire, so a space becomes `+` and arrays or
/// objects arrive as percent-encoded JSON text.
fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
