//! Configuration assembly for the CLI.
//!
//! Responsibilities:
//! - Merge config file, environment and command-line flags into one `Config`.
//! - Derive the loop settings from the final configuration.
//!
//! Invariants:
//! - Precedence is config file < environment < command-line flags.
//! - Blank `--config-path` values are ignored so the default location applies.

use anyhow::{Context, Result};
use pandora_client::QueryMode;
use pandora_config::{Config, ConfigLoader};
use std::time::Duration;

use crate::args::Cli;
use crate::query_loop::LoopSettings;

/// Load the configuration for this invocation.
pub fn load(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if let Some(ref path) = cli.config_path {
        if !path.to_string_lossy().trim().is_empty() {
            loader = loader.with_config_path(path.clone());
        }
    }

    loader = loader
        .from_file()
        .context("Failed to load configuration file")?
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref server) = cli.server {
        loader = loader.with_base_url(server.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_token(token.clone());
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(secs) = cli.request_timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(ms) = cli.poll_interval_ms {
        loader = loader.with_poll_interval(Duration::from_millis(ms));
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_job_timeout(Duration::from_secs(secs));
    }
    if let Some(limit) = cli.limit {
        loader = loader.with_collect_size(limit);
    }
    if let Some(ref mode) = cli.mode {
        loader = loader.with_mode(mode.clone());
    }
    if let Some(secs) = cli.interval {
        loader = loader.with_window(Duration::from_secs(secs));
    }

    loader.build().context("Failed to build configuration")
}

/// Loop settings for `config`, with output behaviour taken from the flags.
pub fn loop_settings(config: &Config, cli: &Cli) -> Result<LoopSettings> {
    let mode: QueryMode = config.query.mode.parse()?;
    Ok(LoopSettings {
        window: config.query.window,
        poll_interval: config.query.poll_interval,
        job_timeout: config.query.job_timeout,
        collect_size: config.query.collect_size,
        mode,
        once: cli.once,
        print_all: cli.all,
    })
}
