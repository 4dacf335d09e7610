//! The entry point for obtaining providers.

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::endpoint::Endpoint;
use crate::logger::{NetworkLogger, TracingLogger};
use crate::provider::HttpProvider;
use crate::transport::{Transport, UreqTransport};

/// Builds [`HttpProvider`]s that share one base URL, logging policy, and
/// transport.
///
/// The logger is decided once, at construction: a [`TracingLogger`] when
/// [`ProviderConfig::logging_enabled`] holds, otherwise none.
#[derive(Clone)]
pub struct NetworkProviderFactory {
    base_url: String,
    logger: Option<Arc<dyn NetworkLogger>>,
    transport: Arc<dyn Transport>,
}

impl NetworkProviderFactory {
    pub fn new(config: ProviderConfig) -> Self {
        let logger: Option<Arc<dyn NetworkLogger>> = if config.logging_enabled() {
            Some(Arc::new(TracingLogger))
        } else {
            None
        };
        Self {
            base_url: config.base_url,
            logger,
            transport: Arc::new(UreqTransport::new()),
        }
    }

    /// Replace the default ureq transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn make<E: Endpoint>(&self) -> HttpProvider<E> {
        HttpProvider::new(self.base_url.clone(), self.logger.clone(), Arc::clone(&self.transport))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> Option<&Arc<dyn NetworkLogger>> {
        self.logger.as_ref()
    }
}
