//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from a config file, environment variables, and direct builder methods.
//! - Validate and build the final immutable `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Config file parsing logic (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over config file values.
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{
    DEFAULT_COLLECT_SIZE, DEFAULT_JOB_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUERY_MODE,
    DEFAULT_QUERY_WINDOW_SECS, DEFAULT_TIMEOUT_SECS, MAX_JOB_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
    SUPPORTED_QUERY_MODES,
};
use crate::types::{AuthConfig, Config, ConnectionConfig, QueryConfig};

/// Configuration loader that builds config from a file, the environment, and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    job_timeout: Option<Duration>,
    collect_size: Option<u64>,
    mode: Option<String>,
    window: Option<Duration>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use an explicit config file instead of the default location.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read configuration from the config file.
    ///
    /// Without an explicit path this reads the default location if the file
    /// exists and does nothing otherwise.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    ///
    /// Environment variables take precedence over config file settings.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the server URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the job status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the job deadline.
    pub fn with_job_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = Some(timeout);
        self
    }

    /// Set the result cap.
    pub fn with_collect_size(mut self, size: u64) -> Self {
        self.collect_size = Some(size);
        self
    }

    /// Set the query mode name.
    pub fn with_mode(mut self, mode: String) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the query window length.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = Some(window);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let token = self
            .token
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        let query = QueryConfig {
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)),
            job_timeout: self
                .job_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_JOB_TIMEOUT_SECS)),
            collect_size: self.collect_size.unwrap_or(DEFAULT_COLLECT_SIZE),
            mode: normalize_mode(self.mode.as_deref().unwrap_or(DEFAULT_QUERY_MODE))?,
            window: self
                .window
                .unwrap_or(Duration::from_secs(DEFAULT_QUERY_WINDOW_SECS)),
        };

        Self::validate_timeouts(&connection, &query)?;

        Ok(Config {
            connection,
            auth: AuthConfig { token },
            query,
        })
    }

    /// Validates timeout-related configuration values.
    ///
    /// Checks:
    /// - request timeout is in `1..=MAX_TIMEOUT_SECS`
    /// - job timeout is in `1..=MAX_JOB_TIMEOUT_SECS`
    /// - poll interval is non-zero and shorter than the job timeout
    /// - query window is non-zero
    fn validate_timeouts(
        connection: &ConnectionConfig,
        query: &QueryConfig,
    ) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        let job_secs = query.job_timeout.as_secs();
        if job_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "job timeout must be greater than 0 seconds".to_string(),
            });
        }
        if job_secs > MAX_JOB_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "job timeout exceeds maximum allowed value of {} seconds",
                    MAX_JOB_TIMEOUT_SECS
                ),
            });
        }

        if query.poll_interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval {
                message: "poll interval must be greater than 0 milliseconds".to_string(),
            });
        }
        if query.poll_interval >= query.job_timeout {
            return Err(ConfigError::InvalidPollInterval {
                message: format!(
                    "poll interval ({} ms) must be shorter than the job timeout ({} s)",
                    query.poll_interval.as_millis(),
                    job_secs
                ),
            });
        }

        if query.window.is_zero() {
            return Err(ConfigError::InvalidValue {
                var: "window".to_string(),
                message: "query window must be greater than 0 seconds".to_string(),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_poll_interval(&mut self, interval: Option<Duration>) {
        self.poll_interval = interval;
    }

    pub(crate) fn set_job_timeout(&mut self, timeout: Option<Duration>) {
        self.job_timeout = timeout;
    }

    pub(crate) fn set_collect_size(&mut self, size: Option<u64>) {
        self.collect_size = size;
    }

    pub(crate) fn set_mode(&mut self, mode: Option<String>) {
        self.mode = mode;
    }

    pub(crate) fn set_window(&mut self, window: Option<Duration>) {
        self.window = window;
    }
}

fn normalize_mode(raw: &str) -> Result<String, ConfigError> {
    let mode = raw.trim().to_ascii_lowercase();
    if SUPPORTED_QUERY_MODES.contains(&mode.as_str()) {
        Ok(mode)
    } else {
        Err(ConfigError::InvalidValue {
            var: "mode".into(),
            message: format!(
                "must be one of {} (got {raw:?})",
                SUPPORTED_QUERY_MODES.join(", ")
            ),
        })
    }
}

pub(crate) fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "server".into(),
        message: format!("must be an absolute http(s) URL with a host: {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "server".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "server".into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
