//! Authentication configuration.
//!
//! The Pandora service authenticates every request with a single opaque
//! token. The client never inspects it; it is attached verbatim by the
//! transport.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token sent as the `Authorization` header on every request.
    #[serde(with = "secret_string")]
    pub token: SecretString,
}

impl AuthConfig {
    /// Create an auth config from a token.
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}
