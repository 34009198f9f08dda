//! Common types shared across the Pandora API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Error body returned by the service with any non-2xx response.
///
/// `Code` and `Message` must be present for a body to count as a service
/// error; `RequestId` is optional and decodes as empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [Code: {}]", self.message, self.code)?;
        if !self.request_id.is_empty() {
            write!(f, " [Request ID: {}]", self.request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Deserialize a JSON `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_decodes_wire_keys() {
        let err: ServiceError =
            serde_json::from_str(r#"{"RequestId":"r1","Code":"E1","Message":"bad query"}"#)
                .unwrap();
        assert_eq!(err.request_id, "r1");
        assert_eq!(err.code, "E1");
        assert_eq!(err.message, "bad query");
    }

    #[test]
    fn test_service_error_request_id_optional() {
        let err: ServiceError =
            serde_json::from_str(r#"{"Code":"E2","Message":"no id"}"#).unwrap();
        assert!(err.request_id.is_empty());
        assert_eq!(err.to_string(), "no id [Code: E2]");
    }

    #[test]
    fn test_service_error_requires_code_and_message() {
        assert!(serde_json::from_str::<ServiceError>(r#"{"RequestId":"r1"}"#).is_err());
        assert!(serde_json::from_str::<ServiceError>(r#"{"error":"nope"}"#).is_err());
    }
}
