//! Typed HTTP client core.
//!
//! # Overview
//! Describe each API call as an [`Endpoint`] and let a [`NetworkProvider`]
//! build the request, send it through a [`Transport`], and decode the JSON
//! response into any `serde` type. Calls come in two shapes: an `async fn`
//! and a cold single-element stream.
//!
//! # Design
//! - Request building ([`build_request`]) is pure and has no I/O, so the
//!   URL, header, and body rules are testable without a network.
//! - The transport is a trait object; [`UreqTransport`] is the default and
//!   tests substitute their own.
//! - Logging is an optional [`NetworkLogger`] injected into the provider,
//!   never global state.
//! - [`NetworkProviderFactory`] is the usual way to get a provider: it fixes
//!   the base URL and decides from [`ProviderConfig`] whether to log.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod factory;
pub mod http;
pub mod logger;
pub mod provider;
pub mod request;
pub mod transport;

pub use config::{LogLevel, ProviderConfig};
pub use endpoint::{Endpoint, Headers, RequestBody};
pub use error::{NetworkError, TransportError};
pub use factory::NetworkProviderFactory;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use logger::{NetworkLogger, TracingLogger};
pub use provider::{HttpProvider, NetworkProvider, ResponseStream};
pub use request::build_request;
pub use transport::{Transport, TransportStream, UreqTransport};
