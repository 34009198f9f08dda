//! Property-based tests for configuration building and serialization.
//!
//! Test coverage:
//! - Server URL normalization never leaves a trailing slash
//! - Config serialization preserves connection, token, and query defaults

use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use pandora_config::{Config, ConfigLoader};
use std::time::Duration;

/// Strategy for generating valid server URLs, optionally with trailing slashes.
fn server_url_strategy() -> impl Strategy<Value = String> {
    let host_strategy = prop_oneof![
        Just("pandora"),
        Just("pandora-prod"),
        Just("logs"),
        Just("search-gw"),
    ];
    let domain_strategy = prop_oneof![
        Just("example.com"),
        Just("internal.local"),
        Just("qiniu.io"),
    ];
    let port_strategy = prop::option::of(1024u16..=65000u16);
    let slashes = 0usize..3;

    (host_strategy, domain_strategy, port_strategy, slashes).prop_map(
        |(host, domain, port, slashes)| {
            let port = port.map(|p| format!(":{p}")).unwrap_or_default();
            format!("https://{host}.{domain}{port}{}", "/".repeat(slashes))
        },
    )
}

fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-:]{16,64}"
}

proptest! {
    #[test]
    fn prop_server_url_is_normalized(url in server_url_strategy(), token in token_strategy()) {
        let config = ConfigLoader::new()
            .with_base_url(url.clone())
            .with_token(token.clone())
            .build()
            .unwrap();

        prop_assert!(!config.connection.base_url.ends_with('/'));
        prop_assert!(url.starts_with(&config.connection.base_url));
        prop_assert_eq!(config.auth.token.expose_secret(), token.as_str());
    }

    #[test]
    fn prop_config_json_roundtrip(
        url in server_url_strategy(),
        token in token_strategy(),
        timeout in 1u64..3600,
        poll_ms in 1u64..5000,
        collect in 0u64..1_000_000,
    ) {
        let mut config = Config::with_token(url, SecretString::new(token.clone().into()));
        config.connection.timeout = Duration::from_secs(timeout);
        config.query.poll_interval = Duration::from_millis(poll_ms);
        config.query.collect_size = collect;

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(back.connection.base_url, config.connection.base_url);
        prop_assert_eq!(back.connection.timeout, config.connection.timeout);
        prop_assert_eq!(back.auth.token.expose_secret(), token.as_str());
        prop_assert_eq!(back.query, config.query);
    }
}
