//! Configuration management for the Pandora query client.
//!
//! This crate provides the immutable [`Config`] value shared by the client
//! and the CLI, plus a [`ConfigLoader`] that merges a JSON config file,
//! environment variables, and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{AuthConfig, Config, ConnectionConfig, QueryConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
