//! Test doubles shared by the provider tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use netkit_core::{
    Endpoint, Headers, HttpMethod, HttpRequest, HttpResponse, NetworkError, NetworkLogger, RequestBody,
    Transport, TransportError, TransportStream,
};

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Endpoint assembled field by field.
#[derive(Debug, Clone, Default)]
pub struct TestEndpoint {
    pub base_url: Option<String>,
    pub path: String,
    pub method: HttpMethod,
    pub headers: Headers,
    pub body: RequestBody,
}

impl TestEndpoint {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: &str, value: Option<&str>) -> Self {
        self.headers.insert(name.to_string(), value.map(str::to_string));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

impl Endpoint for TestEndpoint {
    fn base_url(&self) -> Option<String> {
        self.base_url.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> Headers {
        self.headers.clone()
    }

    fn body(&self) -> RequestBody {
        self.body.clone()
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Returns a canned result and remembers the last request it saw.
pub struct MockTransport {
    stub: Mutex<Result<HttpResponse, TransportError>>,
    seen: Mutex<Seen>,
}

#[derive(Default)]
struct Seen {
    last_request: Option<HttpRequest>,
    calls: usize,
    streams: usize,
}

impl MockTransport {
    pub fn responding(body: &str) -> Self {
        Self::with_stub(Ok(HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with_stub(Err(error))
    }

    fn with_stub(stub: Result<HttpResponse, TransportError>) -> Self {
        Self {
            stub: Mutex::new(stub),
            seen: Mutex::new(Seen::default()),
        }
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.seen.lock().unwrap().last_request.clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().calls
    }

    pub fn stream_count(&self) -> usize {
        self.seen.lock().unwrap().streams
    }

    fn record(&self, request: HttpRequest, streamed: bool) -> Result<HttpResponse, TransportError> {
        let mut seen = self.seen.lock().unwrap();
        seen.last_request = Some(request);
        if streamed {
            seen.streams += 1;
        } else {
            seen.calls += 1;
        }
        self.stub.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.record(request, false)
    }

    fn stream(&self, request: HttpRequest) -> TransportStream {
        let result = self.record(request, true);
        stream::once(async move { result }).boxed()
    }
}

/// A transport whose stream ends without yielding anything.
pub struct SilentTransport;

#[async_trait]
impl Transport for SilentTransport {
    async fn call(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::NoResponse)
    }

    fn stream(&self, _request: HttpRequest) -> TransportStream {
        stream::empty().boxed()
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Logged {
    Request(HttpRequest),
    Response(HttpResponse),
    Error(NetworkError),
}

/// Records every hook invocation in order.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<Logged>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<Logged> {
        self.events.lock().unwrap().clone()
    }

    pub fn requests(&self) -> usize {
        self.count(|e| matches!(e, Logged::Request(_)))
    }

    pub fn responses(&self) -> usize {
        self.count(|e| matches!(e, Logged::Response(_)))
    }

    pub fn errors(&self) -> Vec<NetworkError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Logged::Error(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Logged) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl NetworkLogger for RecordingLogger {
    fn log_request(&self, request: &HttpRequest) {
        self.events.lock().unwrap().push(Logged::Request(request.clone()));
    }

    fn log_response(&self, response: &HttpResponse) {
        self.events.lock().unwrap().push(Logged::Response(response.clone()));
    }

    fn log_error(&self, error: &NetworkError) {
        self.events.lock().unwrap().push(Logged::Error(error.clone()));
    }
}
