//! Query and polling defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_COLLECT_SIZE, DEFAULT_JOB_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUERY_MODE,
    DEFAULT_QUERY_WINDOW_SECS,
};

/// Defaults applied to every job cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Interval between job status checks (serialized as milliseconds).
    #[serde(with = "duration_millis")]
    pub poll_interval: Duration,
    /// Deadline for a job to reach the done state (serialized as seconds).
    #[serde(with = "super::connection::duration_seconds")]
    pub job_timeout: Duration,
    /// Maximum number of results collected by the service.
    pub collect_size: u64,
    /// Query mode name (`fast`, `smart`, or `detailed`).
    pub mode: String,
    /// Length of the queried time window ending at "now" (serialized as seconds).
    #[serde(with = "super::connection::duration_seconds")]
    pub window: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            job_timeout: Duration::from_secs(DEFAULT_JOB_TIMEOUT_SECS),
            collect_size: DEFAULT_COLLECT_SIZE,
            mode: DEFAULT_QUERY_MODE.to_string(),
            window: Duration::from_secs(DEFAULT_QUERY_WINDOW_SECS),
        }
    }
}

/// Module for serializing Duration as milliseconds (integer).
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
