//! Shared request path for every endpoint.
//!
//! Responsibilities:
//! - Send one [`ApiRequest`] through a [`Transport`] and classify the outcome
//!   into a decoded payload or exactly one [`ClientError`] kind.
//! - Record request metrics when a collector is supplied.
//!
//! Does NOT handle:
//! - Retries. A failed request is returned to the caller as-is.
//!
//! Invariants:
//! - A status in `200..=299` is success; anything else is a failure.
//! - A non-2xx body is decoded as a [`ServiceError`] or reported as
//!   [`ClientError::MalformedErrorBody`].
//! - A 2xx body that does not decode is [`ClientError::InvalidResponse`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ServiceError;
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Upper bound on the body excerpt kept in [`ClientError::MalformedErrorBody`].
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Turn a raw response into the expected payload or a classified error.
pub fn classify_response<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    if !response.is_success() {
        return Err(
            match serde_json::from_slice::<ServiceError>(&response.body) {
                Ok(error) => ClientError::Service {
                    status: response.status,
                    error,
                },
                Err(e) => ClientError::MalformedErrorBody {
                    status: response.status,
                    reason: e.to_string(),
                    body: body_excerpt(&response.body),
                },
            },
        );
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        ClientError::InvalidResponse(format!(
            "failed to decode {} response body: {e}",
            response.status
        ))
    })
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut excerpt: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if text.chars().count() > MAX_ERROR_BODY_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}

/// Serialize a JSON request body.
pub(crate) fn encode_body<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ClientError::Encode(e.to_string()))
}

/// Send `request` and classify the response.
///
/// `endpoint` is the metrics label for the call and must not contain job ids.
pub(crate) async fn send<T, R>(
    transport: &T,
    request: ApiRequest,
    endpoint: &'static str,
    metrics: Option<&MetricsCollector>,
) -> Result<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    let method = request.method.clone();
    let path = request.path.clone();
    debug!(method = %method, path = %path, "Sending request");

    if let Some(m) = metrics {
        m.record_request(endpoint, method.as_str());
    }

    let started = Instant::now();
    let outcome = transport.execute(request).await;
    let elapsed = started.elapsed();

    let result = match outcome {
        Ok(response) => {
            debug!(
                method = %method,
                path = %path,
                status = response.status,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "Received response"
            );
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method.as_str(), elapsed, Some(response.status));
            }
            classify_response(&response)
        }
        Err(e) => {
            debug!(method = %method, path = %path, error = %e, "Request failed without a response");
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method.as_str(), elapsed, None);
            }
            Err(ClientError::Transport(e))
        }
    };

    if let (Err(e), Some(m)) = (&result, metrics) {
        m.record_client_error(endpoint, method.as_str(), e);
    }

    result
}
