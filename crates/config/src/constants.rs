//! Centralized constants for the Pandora query workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed HTTP request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Path of the job collection on the Pandora REST API.
pub const JOBS_API_PATH: &str = "/api/v1/jobs";

// =============================================================================
// Job Polling Defaults
// =============================================================================

/// Default polling interval for job status checks in milliseconds.
///
/// Used when a caller passes a zero poll interval.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default deadline for a single job cycle in seconds.
///
/// Used when a caller passes a zero timeout.
pub const DEFAULT_JOB_TIMEOUT_SECS: u64 = 60;

/// Maximum allowed job deadline in seconds (1 hour).
pub const MAX_JOB_TIMEOUT_SECS: u64 = 3600;

// =============================================================================
// Query Defaults
// =============================================================================

/// Default maximum number of results collected per job.
pub const DEFAULT_COLLECT_SIZE: u64 = 10_000;

/// Default query window (and repeat cadence) in seconds (10 minutes).
pub const DEFAULT_QUERY_WINDOW_SECS: u64 = 600;

/// Default query mode name.
pub const DEFAULT_QUERY_MODE: &str = "fast";

/// Query mode names accepted by the service.
pub const SUPPORTED_QUERY_MODES: [&str; 3] = ["fast", "smart", "detailed"];

// =============================================================================
// Paths
// =============================================================================

/// Application name used for the config directory.
pub const APP_DIR_NAME: &str = "pandora-query";

/// File name of the JSON config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
