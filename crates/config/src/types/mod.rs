//! Configuration type definitions for the Pandora query client.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connection, and query defaults.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - The credential is always held as `secrecy::SecretString`.
//! - A built `Config` is never mutated by the client; it is read once at construction.

mod auth;
pub(crate) mod connection;
mod query;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
pub use query::QueryConfig;
