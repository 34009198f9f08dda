//! Testing utilities for Pandora client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! - [`load_fixture`] reads JSON bodies from the crate's `fixtures/` directory.
//! - [`ScriptedTransport`] is an in-memory [`Transport`] that answers from
//!   per-endpoint reply queues, so the job lifecycle can be driven under a
//!   paused tokio clock.
//!
//! # Example
//! ```ignore
//! use pandora_client::testing::{ScriptedReply, ScriptedTransport};
//!
//! let transport = ScriptedTransport::new()
//!     .submit(ScriptedReply::json(200, serde_json::json!({"id": "j1"})))
//!     .status(ScriptedReply::json(200, serde_json::json!({"process": 1})))
//!     .results(ScriptedReply::json(200, serde_json::json!({"fields": [], "rows": []})));
//! ```

use reqwest::Method;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};
use pandora_config::constants::JOBS_API_PATH;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Response(RawResponse),
    NetworkError(String),
}

impl ScriptedReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::Response(RawResponse::new(status, body.to_string()))
    }

    pub fn raw(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::Response(RawResponse::new(status, body))
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError(message.into())
    }

    pub fn job_created(id: &str) -> Self {
        Self::json(200, serde_json::json!({ "id": id }))
    }

    pub fn job_running() -> Self {
        Self::json(200, serde_json::json!({ "process": 0 }))
    }

    pub fn job_done() -> Self {
        Self::json(200, serde_json::json!({ "process": 1 }))
    }
}

/// A request observed by the [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Script {
    submit: VecDeque<ScriptedReply>,
    status: VecDeque<ScriptedReply>,
    results: VecDeque<ScriptedReply>,
    latency: Duration,
    calls: Vec<RecordedCall>,
}

impl Script {
    fn next_reply(&mut self, request: &ApiRequest) -> Option<ScriptedReply> {
        if request.method == Method::POST && request.path == JOBS_API_PATH {
            self.submit.pop_front()
        } else if request.method == Method::GET && request.path.ends_with("/results") {
            self.results.pop_front()
        } else if request.method == Method::GET {
            // The last status reply repeats so "always running" needs one entry.
            if self.status.len() > 1 {
                self.status.pop_front()
            } else {
                self.status.front().cloned()
            }
        } else {
            None
        }
    }
}

/// In-memory transport answering from scripted reply queues.
///
/// Requests are routed by shape: `POST /api/v1/jobs` takes the next submit
/// reply, a `GET` ending in `/results` the next results reply, and any other
/// `GET` the next status reply. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn submit(self, reply: ScriptedReply) -> Self {
        self.lock().submit.push_back(reply);
        self
    }

    pub fn status(self, reply: ScriptedReply) -> Self {
        self.lock().status.push_back(reply);
        self
    }

    pub fn results(self, reply: ScriptedReply) -> Self {
        self.lock().results.push_back(reply);
        self
    }

    /// Delay every reply by `latency` of tokio time.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of status requests made so far.
    pub fn status_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == Method::GET && !c.path.ends_with("/results"))
            .count()
    }

    /// Number of results requests made so far.
    pub fn results_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == Method::GET && c.path.ends_with("/results"))
            .count()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let (reply, latency) = {
            let mut script = self.lock();
            script.calls.push(RecordedCall {
                method: request.method.clone(),
                path: request.path.clone(),
                at: Instant::now(),
            });
            (script.next_reply(&request), script.latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Some(ScriptedReply::Response(response)) => Ok(response),
            Some(ScriptedReply::NetworkError(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new(format!(
                "no scripted reply for {} {}",
                request.method, request.path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_by_request_shape() {
        let transport = ScriptedTransport::new()
            .submit(ScriptedReply::job_created("j1"))
            .status(ScriptedReply::job_running())
            .results(ScriptedReply::raw(200, "{}"));

        let submit = transport
            .execute(ApiRequest::post_json(JOBS_API_PATH, b"{}".to_vec()))
            .await
            .unwrap();
        assert_eq!(submit.body, br#"{"id":"j1"}"#.to_vec());

        let results = transport
            .execute(ApiRequest::get("/api/v1/jobs/j1/results"))
            .await
            .unwrap();
        assert_eq!(results.body, b"{}".to_vec());

        assert_eq!(transport.calls().len(), 2);
        assert_eq!(transport.results_calls(), 1);
    }

    #[tokio::test]
    async fn test_last_status_reply_repeats() {
        let transport = ScriptedTransport::new()
            .status(ScriptedReply::job_running())
            .status(ScriptedReply::job_done());

        for expected in [r#"{"process":0}"#, r#"{"process":1}"#, r#"{"process":1}"#] {
            let response = transport
                .execute(ApiRequest::get("/api/v1/jobs/j1"))
                .await
                .unwrap();
            assert_eq!(response.body, expected.as_bytes().to_vec());
        }
        assert_eq!(transport.status_calls(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_queue_is_a_network_error() {
        let transport = ScriptedTransport::new();
        let err = transport
            .execute(ApiRequest::post_json(JOBS_API_PATH, Vec::new()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no scripted reply"));
    }
}
