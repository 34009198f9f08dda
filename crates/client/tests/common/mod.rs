//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use pandora_client::testing::{ScriptedReply, ScriptedTransport, load_fixture};
#[allow(unused_imports)]
pub use pandora_client::{ClientError, JobHandle, JobSpec, PandoraClient, Value};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// A query spec over a fixed ten minute window.
#[allow(dead_code)]
pub fn test_spec() -> JobSpec {
    let end = chrono::DateTime::from_timestamp_millis(1_700_000_600_000)
        .expect("valid timestamp");
    JobSpec::for_window("repo=\"access\" | stats count() by host", end, Duration::from_secs(600))
}

/// Client on the reqwest transport pointed at a mock server.
#[allow(dead_code)]
pub fn http_client(server: &MockServer) -> PandoraClient {
    PandoraClient::builder()
        .base_url(server.uri())
        .token(secrecy::SecretString::new(TEST_TOKEN.to_string().into()))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client builds")
}

/// Client on a scripted transport.
#[allow(dead_code)]
pub fn scripted_client(transport: &ScriptedTransport) -> PandoraClient<ScriptedTransport> {
    PandoraClient::builder().build_with_transport(transport.clone())
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}
