//! Metrics collection for Pandora API calls and job cycles.
//!
//! This module records:
//! - Request latency histograms and request counters
//! - Error counters by category
//! - Job outcome counters, job duration histograms and status poll counters
//!
//! # What this module does NOT handle:
//! - Metrics exposition (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`, `outcome`
//! - Metric recording is infallible and never affects the call being measured
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "pandora_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "pandora_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "pandora_api_errors_total";

/// Metric name for finished job cycles, labelled by outcome.
pub const METRIC_JOBS_TOTAL: &str = "pandora_jobs_total";

/// Metric name for the wall-clock duration of a job cycle.
pub const METRIC_JOB_DURATION: &str = "pandora_job_duration_seconds";

/// Metric name for status polls issued.
pub const METRIC_JOB_POLLS_TOTAL: &str = "pandora_job_polls_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No HTTP response (connection refused, DNS, reset, request timeout)
    Transport,
    /// Service error with a 4xx status
    Http4xx,
    /// Service error with a 5xx status
    Http5xx,
    /// Service error with any other non-2xx status
    Service,
    /// Non-2xx response with an undecodable body
    Malformed,
    /// 2xx response with an undecodable body
    InvalidResponse,
    /// Request body could not be serialized
    Encode,
    /// Job deadline elapsed
    Timeout,
    /// Job cycle cancelled by the caller
    Cancelled,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Service => "service",
            ErrorCategory::Malformed => "malformed",
            ErrorCategory::InvalidResponse => "invalid_response",
            ErrorCategory::Encode => "encode",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Transport(_) => ErrorCategory::Transport,
            ClientError::Service { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Service
                }
            }
            ClientError::MalformedErrorBody { .. } => ErrorCategory::Malformed,
            ClientError::InvalidResponse(_) => ErrorCategory::InvalidResponse,
            ClientError::Encode(_) => ErrorCategory::Encode,
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::Cancelled => ErrorCategory::Cancelled,
            ClientError::InvalidUrl(_) | ClientError::Config(_) => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Pandora API calls.
///
/// A thin wrapper around the `metrics` crate macros that keeps labels consistent.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error of the given category.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record one status poll.
    pub fn record_poll(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_JOB_POLLS_TOTAL).increment(1);
    }

    /// Record the end of a job cycle.
    ///
    /// `error` is `None` for a completed cycle.
    pub fn record_job(&self, duration: Duration, error: Option<&ClientError>) {
        if !self.enabled {
            return;
        }

        let outcome = error.map_or("completed", |e| ErrorCategory::from(e).as_str());

        metrics::counter!(METRIC_JOBS_TOTAL, "outcome" => outcome).increment(1);
        metrics::histogram!(METRIC_JOB_DURATION, "outcome" => outcome)
            .record(duration.as_secs_f64());
    }
}
