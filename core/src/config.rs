//! Provider configuration.
//!
//! `ProviderConfig` derives `Deserialize` so a host application can embed it
//! in its own config file; the library itself reads no files or environment
//! variables.

use serde::Deserialize;

/// How much provider traffic to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    #[default]
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Prefixed to every endpoint path that has no base URL of its own.
    pub base_url: String,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Logging only happens in debug builds. Defaults to whether this crate
    /// was compiled with debug assertions.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

fn default_debug() -> bool {
    cfg!(debug_assertions)
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            log_level: LogLevel::default(),
            debug: default_debug(),
        }
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Whether providers built from this config get a logger.
    pub fn logging_enabled(&self) -> bool {
        self.debug && self.log_level == LogLevel::All
    }
}
