//! The boundary between the provider and an HTTP stack.
//!
//! # Design
//! `Transport` has two required operations mirroring the provider's two call
//! shapes. `UreqTransport` is the default: ureq is blocking, so each call runs
//! on its own thread and hands the result back over a oneshot channel, which
//! works under any executor. HTTP error statuses are returned as responses,
//! not errors; only failures to send or receive count as `TransportError`.

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Cold, single-element stream of transport results.
pub type TransportStream = BoxStream<'static, Result<HttpResponse, TransportError>>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return the response.
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Execute `request` when the returned stream is first polled. The stream
    /// yields exactly one item.
    fn stream(&self, request: HttpRequest) -> TransportStream;
}

/// [`Transport`] backed by a shared `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a preconfigured agent. Responses with error statuses are still
    /// expected to come back as `Ok`, so the agent should be built with
    /// `http_status_as_error(false)`.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        run_blocking(self.agent.clone(), request).await
    }

    fn stream(&self, request: HttpRequest) -> TransportStream {
        stream::once(run_blocking(self.agent.clone(), request)).boxed()
    }
}

async fn run_blocking(agent: ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("netkit-ureq".to_string())
        .spawn(move || {
            // The receiver is gone when the caller dropped the call.
            let _ = tx.send(execute(&agent, request));
        })
        .map_err(|e| TransportError::Runtime(e.to_string()))?;
    rx.await.map_err(|e| TransportError::Runtime(e.to_string()))?
}

/// Execute an `HttpRequest` with ureq and collect the whole response.
fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    debug!(method = %req.method, url = %req.url, "dispatching over ureq");

    let result = match req.method {
        HttpMethod::Get => call(with_headers(agent.get(&req.url), &req.headers), req.body),
        HttpMethod::Head => call(with_headers(agent.head(&req.url), &req.headers), req.body),
        HttpMethod::Delete => call(with_headers(agent.delete(&req.url), &req.headers), req.body),
        HttpMethod::Options => call(with_headers(agent.options(&req.url), &req.headers), req.body),
        HttpMethod::Post => send(with_headers(agent.post(&req.url), &req.headers), req.body),
        HttpMethod::Put => send(with_headers(agent.put(&req.url), &req.headers), req.body),
        HttpMethod::Patch => send(with_headers(agent.patch(&req.url), &req.headers), req.body),
    };
    let mut response = result.map_err(|e| TransportError::Request(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| TransportError::Request(e.to_string()))?;

    Ok(HttpResponse { status, headers, body })
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

fn call(
    builder: ureq::RequestBuilder<ureq::typestate::WithoutBody>,
    body: Option<Vec<u8>>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.force_send_body().send(&bytes[..]),
        None => builder.call(),
    }
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<Vec<u8>>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.send(&bytes[..]),
        None => builder.send_empty(),
    }
}
