//! Configuration module for as-client.
//!
//! [`ClientConfig`] carries what every request needs: the base URL that paths
//! are appended to, the HTTP transport, and the User-Agent value. Nothing is
//! read from files or the environment; callers set values in code.

mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

use crate::error::{ClientError, Result};
use reqwest::Client as Transport;
use std::time::Duration;

/// Default timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header value.
pub const DEFAULT_USER_AGENT: &str = "go-writeas v1";

/// Runtime configuration shared by every request a client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, prepended verbatim to request paths.
    base_url: String,
    /// HTTP transport executing the requests.
    transport: Transport,
    /// User-Agent header value.
    user_agent: String,
    /// Timeout the transport was built with.
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with an empty base URL, a transport with the
    /// default 10 second timeout, and the default User-Agent.
    pub fn new() -> Result<Self> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url: String::new(),
            transport: build_transport(timeout)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout,
        })
    }

    /// Sets the base URL. No normalization is applied.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Rebuilds the transport with a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.transport = build_transport(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Returns the base URL paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the User-Agent header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the HTTP transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

fn build_transport(timeout: Duration) -> Result<Transport> {
    Transport::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::config_with_source("Failed to create HTTP client", e))
}
