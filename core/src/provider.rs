//! Executes endpoint calls: build, dispatch, decode.
//!
//! # Design
//! `NetworkProvider` has one required method per call shape. `HttpProvider`
//! is the production implementation; it holds a base URL, an optional
//! logger, and a transport, and keeps no state between calls. Every error
//! goes to the logger once, where it is detected, and is then returned
//! unchanged.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;

use crate::endpoint::Endpoint;
use crate::error::{NetworkError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::logger::NetworkLogger;
use crate::request::build_request;
use crate::transport::Transport;

/// Single-element stream returned by [`NetworkProvider::request_stream`].
pub type ResponseStream<R> = BoxStream<'static, Result<R, NetworkError>>;

/// Executes calls described by endpoints of type `E`.
#[async_trait]
pub trait NetworkProvider<E>: Send + Sync
where
    E: Endpoint + Send + 'static,
{
    /// Perform the call and decode the JSON response body into `R`.
    async fn request<R>(&self, endpoint: E) -> Result<R, NetworkError>
    where
        R: DeserializeOwned + Send + 'static;

    /// Same as [`request`](Self::request), but nothing happens until the
    /// returned stream is polled. The stream yields one item and ends.
    fn request_stream<R>(&self, endpoint: E) -> ResponseStream<R>
    where
        R: DeserializeOwned + Send + 'static;
}

/// [`NetworkProvider`] over a [`Transport`].
pub struct HttpProvider<E> {
    base_url: String,
    observer: Observer,
    transport: Arc<dyn Transport>,
    _endpoint: PhantomData<fn(E)>,
}

impl<E> HttpProvider<E> {
    pub fn new(
        base_url: impl Into<String>,
        logger: Option<Arc<dyn NetworkLogger>>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            observer: Observer(logger),
            transport,
            _endpoint: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_logger(&self) -> bool {
        self.observer.0.is_some()
    }
}

impl<E> Clone for HttpProvider<E> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            observer: self.observer.clone(),
            transport: Arc::clone(&self.transport),
            _endpoint: PhantomData,
        }
    }
}

#[async_trait]
impl<E> NetworkProvider<E> for HttpProvider<E>
where
    E: Endpoint + Send + 'static,
{
    async fn request<R>(&self, endpoint: E) -> Result<R, NetworkError>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let request = build_request(&endpoint, &self.base_url).map_err(|e| self.observer.fail(e))?;
        self.observer.request(&request);
        let response = self
            .transport
            .call(request)
            .await
            .map_err(|e| self.observer.fail(e.into()))?;
        self.observer.response(&response);
        decode::<R>(&response.body).map_err(|e| self.observer.fail(e))
    }

    fn request_stream<R>(&self, endpoint: E) -> ResponseStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let base_url = self.base_url.clone();
        let observer = self.observer.clone();
        let transport = Arc::clone(&self.transport);

        stream::once(async move {
            let request = build_request(&endpoint, &base_url).map_err(|e| observer.fail(e))?;
            observer.request(&request);
            let response = transport
                .stream(request)
                .next()
                .await
                .unwrap_or(Err(TransportError::NoResponse))
                .map_err(|e| observer.fail(e.into()))?;
            observer.response(&response);
            decode::<R>(&response.body).map_err(|e| observer.fail(e))
        })
        .boxed()
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, NetworkError> {
    serde_json::from_slice(body).map_err(|e| NetworkError::Decoding(e.to_string()))
}

/// Forwards to the logger when one is attached.
#[derive(Clone)]
struct Observer(Option<Arc<dyn NetworkLogger>>);

impl Observer {
    fn request(&self, request: &HttpRequest) {
        if let Some(logger) = &self.0 {
            logger.log_request(request);
        }
    }

    fn response(&self, response: &HttpResponse) {
        if let Some(logger) = &self.0 {
            logger.log_response(response);
        }
    }

    fn fail(&self, error: NetworkError) -> NetworkError {
        if let Some(logger) = &self.0 {
            logger.log_error(&error);
        }
        error
    }
}
