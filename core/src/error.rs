//! Error types for the network provider.
//!
//! # Design
//! `NetworkError` names the stage that failed: URL resolution, body
//! serialization, transport, or response decoding. Transport failures are
//! carried verbatim inside `NetworkError::Transport` so callers can match on
//! what the transport reported. Both types are `Clone + PartialEq` so a
//! logger can keep a copy and tests can compare against the exact error.

/// Failure reported by a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The transport's stream ended without producing a response.
    #[error("transport finished without a response")]
    NoResponse,

    /// The thread running the request could not start or ended without a result.
    #[error("transport task failed: {0}")]
    Runtime(String),
}

/// Errors returned by [`crate::NetworkProvider`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The resolved base URL + path is not a valid absolute URL.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request body could not be serialized to a JSON object.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    Decoding(String),
}

impl NetworkError {
    /// The transport error this call failed with, if any.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            NetworkError::Transport(e) => Some(e),
            _ => None,
        }
    }
}
