//! Client builder for constructing [`PandoraClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required settings (server URL, token)
//! - Configuring the HTTP transport (timeout, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`PandoraClient`] methods)
//!
//! # Invariants
//! - The server URL and token are required before calling `build()`
//! - The server URL is always normalized to have no trailing slashes

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use crate::client::PandoraClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::JobHandle;
use crate::transport::{HttpTransport, Transport};
use pandora_config::{Config, constants::DEFAULT_TIMEOUT_SECS};

/// Callback invoked with the handle of a job the client stopped waiting for.
///
/// Called when a deadline expires or the caller cancels while the job is
/// still running server-side. The client does not cancel the job upstream.
pub type AbandonHook = Arc<dyn Fn(&JobHandle) + Send + Sync>;

/// Builder for [`PandoraClient`].
pub struct PandoraClientBuilder {
    base_url: Option<String>,
    token: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
    on_abandon: Option<AbandonHook>,
}

impl Default for PandoraClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
            on_abandon: None,
        }
    }
}

impl PandoraClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL, e.g. `https://pandora.example.com`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the credential sent as the `Authorization` header.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against development servers.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request HTTP timeout.
    ///
    /// Default is 30 seconds. Bounds the result fetch, which the job deadline
    /// does not cover.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the metrics collector for request and job metrics.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Register a callback for jobs abandoned on timeout or cancellation.
    pub fn on_job_abandoned<F>(mut self, hook: F) -> Self
    where
        F: Fn(&JobHandle) + Send + Sync + 'static,
    {
        self.on_abandon = Some(Arc::new(hook));
        self
    }

    /// Take the connection settings from a loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.token = Some(config.auth.token.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self
    }

    /// Build a client on the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if no server URL was provided and
    /// [`ClientError::Config`] if the token is missing or the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<PandoraClient<HttpTransport>> {
        let base_url = self
            .base_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;

        let token = self
            .token
            .clone()
            .ok_or_else(|| ClientError::Config("token is required".to_string()))?;

        let transport = HttpTransport::new(&base_url, token, self.timeout, self.skip_verify)?;
        Ok(self.build_with_transport(transport))
    }

    /// Build a client on a caller-supplied transport.
    ///
    /// Connection settings on the builder are ignored; they belong to the transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> PandoraClient<T> {
        PandoraClient {
            transport: Arc::new(transport),
            metrics: self.metrics,
            on_abandon: self.on_abandon,
        }
    }
}

/// Remove trailing slashes so endpoint paths can be appended directly.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> SecretString {
        SecretString::new("test-token".to_string().into())
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://pandora.example.com/"),
            "https://pandora.example.com"
        );
        assert_eq!(
            normalize_base_url("https://pandora.example.com//"),
            "https://pandora.example.com"
        );
        assert_eq!(
            normalize_base_url("https://pandora.example.com"),
            "https://pandora.example.com"
        );
    }

    #[test]
    fn test_build_requires_url_and_token() {
        let err = PandoraClient::builder().token(token()).build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err = PandoraClient::builder()
            .base_url("https://pandora.example.com".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::with_token("https://pandora.example.com".to_string(), token());
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);

        let builder = PandoraClient::builder().from_config(&config);
        assert_eq!(
            builder.base_url.as_deref(),
            Some("https://pandora.example.com")
        );
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));

        let client = builder.build().unwrap();
        assert_eq!(client.base_url(), "https://pandora.example.com");
    }

    #[test]
    fn test_on_job_abandoned_is_stored() {
        let client = PandoraClient::builder()
            .base_url("https://pandora.example.com/".to_string())
            .token(token())
            .on_job_abandoned(|_| {})
            .build()
            .unwrap();
        assert!(client.on_abandon.is_some());
        assert_eq!(client.base_url(), "https://pandora.example.com");
    }
}
