//! Job models for the Pandora search API.
//!
//! # What this module handles:
//! - Job submission parameters ([`JobSpec`]) and their wire encoding
//! - The server-assigned [`JobHandle`]
//! - Job status snapshots ([`JobStatus`])
//!
//! # What this module does NOT handle:
//! - Submission and polling logic (see [`crate::client::query`])
//! - HTTP transport (see [`crate::endpoints::jobs`])

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ClientError;

/// Execution mode requested for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Fast,
    Smart,
    Detailed,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Smart => "smart",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "smart" => Ok(Self::Smart),
            "detailed" => Ok(Self::Detailed),
            other => Err(ClientError::Config(format!(
                "unknown query mode '{other}', expected fast, smart or detailed"
            ))),
        }
    }
}

/// Everything needed to submit one query job.
///
/// The time range is not validated locally; the service decides what to do
/// with an empty or inverted range.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    query: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    collect_size: u64,
    mode: QueryMode,
}

impl JobSpec {
    /// Create a spec for `query` over `[start, end]` with the default result cap and mode.
    pub fn new(query: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            query: query.into(),
            start,
            end,
            collect_size: pandora_config::constants::DEFAULT_COLLECT_SIZE,
            mode: QueryMode::default(),
        }
    }

    /// Create a spec covering the `window` that ends at `end`.
    pub fn for_window(query: impl Into<String>, end: DateTime<Utc>, window: Duration) -> Self {
        let span = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
        let start = end
            .checked_sub_signed(span)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::new(query, start, end)
    }

    /// Set the maximum number of results the service should collect.
    pub fn collect_size(mut self, size: u64) -> Self {
        self.collect_size = size;
        self
    }

    /// Set the query mode.
    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn result_cap(&self) -> u64 {
        self.collect_size
    }

    pub fn query_mode(&self) -> QueryMode {
        self.mode
    }
}

/// Wire body for `POST /api/v1/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateJobRequest<'a> {
    pub query: &'a str,
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "endTime")]
    pub end_time: i64,
    pub preview: bool,
    #[serde(rename = "collectSize")]
    pub collect_size: u64,
    pub mode: QueryMode,
}

impl<'a> From<&'a JobSpec> for CreateJobRequest<'a> {
    fn from(spec: &'a JobSpec) -> Self {
        Self {
            query: &spec.query,
            start_time: spec.start.timestamp_millis(),
            end_time: spec.end.timestamp_millis(),
            preview: false,
            collect_size: spec.collect_size,
            mode: spec.mode,
        }
    }
}

/// Opaque job identifier assigned by the service on submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire body returned by a successful submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobResponse {
    pub id: JobHandle,
}

/// Processing state of a job.
///
/// The service reports `0` while running and `1` once done. Any other code is
/// treated as running since the job is not known to be done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum JobProcess {
    #[default]
    Running,
    Done,
}

impl From<i64> for JobProcess {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Done,
            _ => Self::Running,
        }
    }
}

impl From<JobProcess> for i64 {
    fn from(process: JobProcess) -> Self {
        match process {
            JobProcess::Running => 0,
            JobProcess::Done => 1,
        }
    }
}

/// Snapshot of a job's progress returned by a status poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(default)]
    pub process: JobProcess,
    #[serde(rename = "duration", default)]
    pub duration_ms: i64,
    #[serde(rename = "eventSize", default)]
    pub event_count: i64,
    #[serde(rename = "resultSize", default)]
    pub result_count: i64,
    #[serde(rename = "scanSize", default)]
    pub scan_count: i64,
    #[serde(rename = "isResult", default)]
    pub is_result: bool,
    #[serde(rename = "isExport", default)]
    pub is_export: bool,
}

impl JobStatus {
    pub fn is_done(&self) -> bool {
        self.process == JobProcess::Done
    }
}
