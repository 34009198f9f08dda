//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Environment variables take precedence over config file settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("PANDORA_SERVER") {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none("PANDORA_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = parse_env::<bool>("PANDORA_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("PANDORA_TIMEOUT", "must be a number of seconds")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(ms) = parse_env::<u64>(
        "PANDORA_POLL_INTERVAL_MS",
        "must be a number of milliseconds",
    )? {
        loader.set_poll_interval(Some(Duration::from_millis(ms)));
    }
    if let Some(secs) = parse_env::<u64>("PANDORA_JOB_TIMEOUT", "must be a number of seconds")? {
        loader.set_job_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(size) = parse_env::<u64>(
        "PANDORA_COLLECT_SIZE",
        "must be a non-negative integer",
    )? {
        loader.set_collect_size(Some(size));
    }
    if let Some(mode) = env_var_or_none("PANDORA_QUERY_MODE") {
        loader.set_mode(Some(mode));
    }
    if let Some(secs) = parse_env::<u64>("PANDORA_QUERY_WINDOW", "must be a number of seconds")? {
        loader.set_window(Some(Duration::from_secs(secs)));
    }
    Ok(())
}
