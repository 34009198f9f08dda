//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from a JSON config file, `.env` files, and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Writing configuration back to disk.
//! - Interpreting the credential (it is opaque to the whole workspace).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest to highest: config file, environment, builder overrides.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;


pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use file::default_config_path;
