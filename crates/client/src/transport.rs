//! Transport capability used by the client to reach the Pandora service.
//!
//! Responsibilities:
//! - Define the [`Transport`] seam: issue one request, get status and body back,
//!   or a network-level failure.
//! - Provide the production [`HttpTransport`] on top of `reqwest`.
//!
//! Does NOT handle:
//! - Interpreting status codes or bodies (see [`crate::endpoints::request`]).
//! - Retrying failed requests.
//!
//! Invariants:
//! - Every request sent by [`HttpTransport`] carries the credential verbatim
//!   in the `Authorization` header.
//! - Paths in [`ApiRequest`] are absolute paths appended to the server URL.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ClientError, Result};
use pandora_config::constants::DEFAULT_MAX_REDIRECTS;

/// One request to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// A POST request whose body is already encoded JSON.
    pub fn post_json(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Status and body of a response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request did not produce an HTTP response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    /// Whether the request hit the per-request timeout.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else if err.is_body() || err.is_decode() {
            "failed to read response body".to_string()
        } else {
            format!("request failed: {err}")
        };
        Self {
            message,
            timed_out: err.is_timeout(),
            source: Some(Box::new(err)),
        }
    }
}

/// Issues requests against the service.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = std::result::Result<RawResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport bound to one server and credential.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish()
    }
}

impl HttpTransport {
    /// Build a transport for `base_url`.
    ///
    /// `skip_verify` disables TLS certificate verification and has no effect
    /// on plain HTTP URLs.
    pub fn new(
        base_url: &str,
        token: SecretString,
        timeout: Duration,
        skip_verify: bool,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is required".to_string()));
        }
        HeaderValue::from_str(token.expose_secret()).map_err(|_| {
            ClientError::Config("token contains characters not allowed in a header".to_string())
        })?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!("skip_verify=true has no effect on HTTP URLs");
            }
        }

        let http = http_builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method, &url)
            .header(AUTHORIZATION, self.token.expose_secret());

        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}
