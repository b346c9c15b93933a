//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used to talk to the language API.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::http;
use crate::errors::{ClientError, ClientResult};

/// Configuration for the language API HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the language API
    pub base_url: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of idle connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_BASE_URL.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API location
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Parse the configured base URL
    ///
    /// A trailing slash is added when missing so that joining endpoint
    /// segments keeps the full base path.
    pub fn parse_base_url(&self) -> ClientResult<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: self.base_url.clone(),
            error: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: self.base_url.clone(),
                error: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(url)
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> ClientResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.pool_max_per_host);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build().map_err(ClientError::Http)
    }
}
