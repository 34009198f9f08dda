//! Main Pandora client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `query`: Job lifecycle (submit, poll, fetch) and the query entry points
//!
//! # What this module does NOT handle:
//! - Request classification (delegated to [`crate::endpoints`])
//! - The wire connection (delegated to a [`Transport`])
//!
//! # Invariants
//! - A client never mutates its configuration after construction; clones share it.

pub mod builder;
mod query;

pub use query::ProgressCallback;

use std::fmt;
use std::sync::Arc;

use crate::metrics::MetricsCollector;
use crate::transport::{HttpTransport, Transport};
use builder::AbandonHook;

/// Pandora search API client.
///
/// Generic over its [`Transport`] so the job lifecycle can run against a
/// scripted transport in tests. Build one with [`PandoraClient::builder()`]:
///
/// ```rust,ignore
/// use pandora_client::PandoraClient;
/// use secrecy::SecretString;
///
/// let client = PandoraClient::builder()
///     .base_url("https://pandora.example.com".to_string())
///     .token(SecretString::new("my-token".to_string().into()))
///     .build()?;
/// ```
pub struct PandoraClient<T = HttpTransport> {
    pub(crate) transport: Arc<T>,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) on_abandon: Option<AbandonHook>,
}

impl<T> Clone for PandoraClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            metrics: self.metrics.clone(),
            on_abandon: self.on_abandon.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PandoraClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PandoraClient")
            .field("transport", &self.transport)
            .field("metrics", &self.metrics)
            .field("on_abandon", &self.on_abandon.is_some())
            .finish()
    }
}

impl PandoraClient<HttpTransport> {
    /// Create a new client builder.
    pub fn builder() -> builder::PandoraClientBuilder {
        builder::PandoraClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

impl<T: Transport> PandoraClient<T> {
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
