//! Integration tests for configuration loading as the CLI drives it.
//!
//! These tests verify end-to-end config loading behavior through the public
//! `ConfigLoader` builder chain.

use pandora_config::constants::{DEFAULT_JOB_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS};
use pandora_config::{ConfigError, ConfigLoader, env_var_or_none};
use std::time::Duration;

/// Values set via builder methods (simulating CLI args) produce a complete config.
#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_base_url("https://cli-override.example.com".to_string())
        .with_token("cli-token".to_string())
        .with_window(Duration::from_secs(60))
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(
        config.connection.base_url,
        "https://cli-override.example.com"
    );
    assert_eq!(config.query.window, Duration::from_secs(60));
    assert_eq!(
        config.query.poll_interval,
        Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
    );
    assert_eq!(
        config.query.job_timeout,
        Duration::from_secs(DEFAULT_JOB_TIMEOUT_SECS)
    );
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("PANDORA_SERVER");
}

#[test]
fn test_config_file_round_trip_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "server": "http://127.0.0.1:9999/",
            "token": "Pandora abc:def",
            "skip_verify": true,
            "timeout_seconds": 12,
            "poll_interval_ms": 200,
            "job_timeout_seconds": 30,
            "window_seconds": 900
        }"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(path)
        .from_file()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "http://127.0.0.1:9999");
    assert!(config.connection.skip_verify);
    assert_eq!(config.connection.timeout, Duration::from_secs(12));
    assert_eq!(config.query.poll_interval, Duration::from_millis(200));
    assert_eq!(config.query.job_timeout, Duration::from_secs(30));
    assert_eq!(config.query.window, Duration::from_secs(900));
}

#[test]
fn test_malformed_config_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = ConfigLoader::new()
        .with_config_path(path.clone())
        .from_file()
        .err()
        .unwrap();

    match err {
        ConfigError::ConfigFileParse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}
