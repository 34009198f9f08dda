//! Error types for the Pandora client.
//!
//! Every failed call produces exactly one [`ClientError`] kind. The kinds
//! that can come out of a job cycle are:
//! - [`ClientError::Encode`]: the request body could not be serialized
//! - [`ClientError::Transport`]: the request never produced an HTTP response
//! - [`ClientError::Service`]: non-2xx response with a decodable error body
//! - [`ClientError::MalformedErrorBody`]: non-2xx response whose body is not a service error
//! - [`ClientError::InvalidResponse`]: 2xx response whose body is not the expected payload
//! - [`ClientError::Timeout`]: the job deadline elapsed while polling
//! - [`ClientError::Cancelled`]: the caller cancelled the cycle

use std::time::Duration;
use thiserror::Error;

use crate::models::ServiceError;
use crate::transport::TransportError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Pandora client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request body could not be serialized; nothing was sent.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Network or connection level failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service rejected the request or reported an error.
    #[error("Service error ({status}): {error}")]
    Service { status: u16, error: ServiceError },

    /// Non-success response whose body could not be decoded as a service error.
    #[error("Service returned status {status} with an undecodable error body: {reason}")]
    MalformedErrorBody {
        status: u16,
        reason: String,
        body: String,
    },

    /// Success response whose body could not be decoded.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Job did not reach the done state before the deadline.
    #[error("Job timed out after {0:?}")]
    Timeout(Duration),

    /// Job cycle cancelled by the caller.
    #[error("Job cancelled")]
    Cancelled,

    /// Invalid server URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client could not be constructed from the supplied settings.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Check if a new job cycle might succeed where this one failed.
    ///
    /// Service errors are not retryable without changing the input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// The decoded service error, if this is a [`ClientError::Service`].
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status of the response that caused this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } | Self::MalformedErrorBody { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16) -> ClientError {
        ClientError::Service {
            status,
            error: ServiceError {
                request_id: "r1".to_string(),
                code: "E1".to_string(),
                message: "bad query".to_string(),
            },
        }
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ClientError::Transport(TransportError::new("connection reset")).is_retryable());

        assert!(!service(400).is_retryable());
        assert!(!ClientError::Cancelled.is_retryable());
        assert!(!ClientError::InvalidResponse("x".to_string()).is_retryable());
        assert!(!ClientError::Encode("x".to_string()).is_retryable());
    }

    #[test]
    fn test_service_error_accessor() {
        let err = service(400);
        let decoded = err.service_error().unwrap();
        assert_eq!(decoded.request_id, "r1");
        assert_eq!(decoded.code, "E1");
        assert_eq!(err.status(), Some(400));

        assert!(ClientError::Cancelled.service_error().is_none());
        assert_eq!(ClientError::Cancelled.status(), None);
    }

    #[test]
    fn test_display_includes_request_id_and_code() {
        let msg = service(400).to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("bad query"));
        assert!(msg.contains("E1"));
        assert!(msg.contains("r1"));
    }
}
