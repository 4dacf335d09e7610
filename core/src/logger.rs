//! Observers for provider traffic.
//!
//! A logger sees every outgoing request, every received response, and every
//! error, and cannot influence any of them.

use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};

/// Side-effect-only hooks called by [`crate::HttpProvider`].
pub trait NetworkLogger: Send + Sync {
    fn log_request(&self, request: &HttpRequest);

    fn log_response(&self, response: &HttpResponse);

    fn log_error(&self, error: &NetworkError);
}

/// Emits `tracing` events for provider traffic.
///
/// Requests and responses are `DEBUG`, errors are `WARN`. Bodies are logged
/// as lossy UTF-8. Credential headers keep their name but not their value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl NetworkLogger for TracingLogger {
    fn log_request(&self, request: &HttpRequest) {
        debug!(
            method = %request.method,
            url = %request.url,
            headers = ?redacted(&request.headers),
            body = %request.body.as_deref().map(String::from_utf8_lossy).unwrap_or_default(),
            "sending request"
        );
    }

    fn log_response(&self, response: &HttpResponse) {
        debug!(
            status = response.status,
            headers = ?redacted(&response.headers),
            body = %String::from_utf8_lossy(&response.body),
            "received response"
        );
    }

    fn log_error(&self, error: &NetworkError) {
        warn!(error = %error, "request failed");
    }
}

const SENSITIVE_HEADERS: &[&str] = &["authorization", "proxy-authorization", "cookie", "set-cookie", "x-api-key"];

const REDACTED: &str = "[redacted]";

fn redacted(headers: &[(String, String)]) -> Vec<(&str, &str)> {
    headers
        .iter()
        .map(|(name, value)| {
            let sensitive = SENSITIVE_HEADERS.iter().any(|s| name.eq_ignore_ascii_case(s));
            (name.as_str(), if sensitive { REDACTED } else { value.as_str() })
        })
        .collect()
}
