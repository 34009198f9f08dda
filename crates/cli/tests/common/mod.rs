//! Shared test utilities for pandora-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the three job endpoints on a mock server.
//!
//! Invariants / Assumptions:
//! - `PANDORA_TOKEN` is set to "test-token" unless overridden.

use assert_cmd::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Returns a hermetic `pandora-get` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `PANDORA_TOKEN` is set to a dummy value to satisfy config validation.
/// - Other PANDORA_* variables are cleared so nothing leaks from the host.
pub fn pandora_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pandora-get");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("PANDORA_TOKEN", TEST_TOKEN);

    cmd.env_remove("PANDORA_SERVER")
        .env_remove("PANDORA_CONFIG_PATH")
        .env_remove("PANDORA_SKIP_VERIFY")
        .env_remove("PANDORA_TIMEOUT")
        .env_remove("PANDORA_POLL_INTERVAL_MS")
        .env_remove("PANDORA_JOB_TIMEOUT")
        .env_remove("PANDORA_COLLECT_SIZE")
        .env_remove("PANDORA_QUERY_MODE")
        .env_remove("PANDORA_QUERY_WINDOW")
        .env_remove("RUST_LOG");

    cmd
}

/// A single-cycle command against `server` with fast polling.
#[allow(dead_code)]
pub fn once_cmd(server: &MockServer) -> Command {
    let mut cmd = pandora_cmd();
    cmd.env("PANDORA_SERVER", server.uri())
        .args(["--once", "--poll-interval-ms", "20", "--timeout", "5"]);
    cmd
}

/// Mount submit, a done status and `results` for job `job-1`.
#[allow(dead_code)]
pub async fn mount_job(server: &MockServer, results: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs"))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "job-1"})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "process": 1,
            "duration": 40,
            "resultSize": 2
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/job-1/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results))
        .mount(server)
        .await;
}

/// Two rows grouped by host.
#[allow(dead_code)]
pub fn host_counts() -> serde_json::Value {
    serde_json::json!({
        "fields": [
            {"flag": "bucket", "name": "host", "bucketIndex": 0},
            {"flag": "metric", "name": "count"}
        ],
        "rows": [["a", 3], ["b", 5]]
    })
}
