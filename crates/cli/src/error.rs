//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use pandora_client::ClientError;
use thiserror::Error;

/// Structured exit codes for pandora-get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the query completed.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - the service rejected the token (HTTP 401).
    AuthenticationFailed = 2,

    /// Connection error - no HTTP response (refused, DNS, request timeout).
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// Resource not found - unknown job or endpoint (HTTP 404).
    NotFound = 4,

    /// Validation error - the query or its parameters were rejected.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - insufficient privileges (HTTP 403).
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502, 503 or 504.
    ServiceUnavailable = 8,

    /// The job did not finish before the deadline.
    JobTimeout = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) => ExitCode::ConnectionError,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::Timeout(_) => ExitCode::JobTimeout,
            ClientError::Cancelled => ExitCode::Interrupted,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,
            ClientError::Config(_) | ClientError::Encode(_) => ExitCode::GeneralError,

            ClientError::Service { status, .. } | ClientError::MalformedErrorBody { status, .. } => {
                match *status {
                    400 | 422 => ExitCode::ValidationError,
                    401 => ExitCode::AuthenticationFailed,
                    403 => ExitCode::PermissionDenied,
                    404 => ExitCode::NotFound,
                    429 => ExitCode::RateLimited,
                    502..=504 => ExitCode::ServiceUnavailable,
                    _ => ExitCode::GeneralError,
                }
            }
        }
    }
}

/// Problem with the query input itself, before anything is sent.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InputError(pub String);

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<InputError>().is_some() {
                return ExitCode::ValidationError;
            }
        }

        ExitCode::GeneralError
    }
}
