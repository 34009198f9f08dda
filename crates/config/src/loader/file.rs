//! JSON config file loading.
//!
//! Responsibilities:
//! - Determine the default config file location (platform config dir).
//! - Parse the flat JSON config file and apply its values to a `ConfigLoader`.
//!
//! Invariants:
//! - Every key in the file is optional.
//! - A missing file at the default location is not an error; a missing file at
//!   an explicitly requested path is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};

/// On-disk representation of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    server: Option<String>,
    token: Option<String>,
    skip_verify: Option<bool>,
    timeout_seconds: Option<u64>,
    poll_interval_ms: Option<u64>,
    job_timeout_seconds: Option<u64>,
    collect_size: Option<u64>,
    mode: Option<String>,
    window_seconds: Option<u64>,
}

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/pandora-query/config.json`
/// - macOS: `~/Library/Application Support/pandora-query/config.json`
/// - Windows: `%AppData%\pandora-query\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_DIR_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply the config file to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let path = match loader.config_path() {
        Some(path) => path.clone(),
        None => {
            let path = default_config_path()
                .map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?;
            if !path.exists() {
                debug!("No config file at {}", path.display());
                return Ok(());
            }
            path
        }
    };

    debug!("Loading config file {}", path.display());
    let file = read_config_file(&path)?;

    if file.server.is_some() {
        loader.set_base_url(file.server);
    }
    if let Some(token) = file.token {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if file.skip_verify.is_some() {
        loader.set_skip_verify(file.skip_verify);
    }
    if let Some(secs) = file.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(ms) = file.poll_interval_ms {
        loader.set_poll_interval(Some(Duration::from_millis(ms)));
    }
    if let Some(secs) = file.job_timeout_seconds {
        loader.set_job_timeout(Some(Duration::from_secs(secs)));
    }
    if file.collect_size.is_some() {
        loader.set_collect_size(file.collect_size);
    }
    if file.mode.is_some() {
        loader.set_mode(file.mode);
    }
    if let Some(secs) = file.window_seconds {
        loader.set_window(Some(Duration::from_secs(secs)));
    }
    Ok(())
}
