//! Job lifecycle: submit, poll until done or deadline, fetch, project.
//!
//! Invariants:
//! - Status is never requested before a successful submit, and results are
//!   never requested before a done status for the same handle.
//! - The deadline covers polling only. When it fires, the pending tick or
//!   in-flight status request is dropped and no further request is made.
//! - At every wait point the deadline is checked before cancellation, and
//!   cancellation before the poll source, so a busy poll loop cannot starve it.
//! - A failed poll ends the cycle immediately; there is no retry.

use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;
use crate::client::PandoraClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{FlatRecord, JobHandle, JobSpec, JobStatus, ResultSet};
use crate::transport::Transport;
use pandora_config::constants::{DEFAULT_JOB_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS};

/// Number of leading query characters kept in log lines.
const QUERY_LOG_PREFIX_CHARS: usize = 24;

/// Upper bound on the job deadline. Keeps `Instant` arithmetic in the
/// ticker from overflowing for arbitrarily large durations.
const MAX_JOB_WAIT: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Progress callback invoked with every status snapshot while polling.
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(&JobStatus) + Send);

fn effective_poll_interval(poll_interval: Duration) -> Duration {
    if poll_interval.is_zero() {
        Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
    } else {
        poll_interval
    }
}

fn effective_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        Duration::from_secs(DEFAULT_JOB_TIMEOUT_SECS)
    } else {
        timeout.min(MAX_JOB_WAIT)
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Query text reduced to its length and a short prefix.
fn redact_query(query: &str) -> String {
    let prefix: String = query.chars().take(QUERY_LOG_PREFIX_CHARS).collect();
    if prefix.len() < query.len() {
        format!("{prefix}... ({} bytes)", query.len())
    } else {
        prefix
    }
}

impl<T: Transport> PandoraClient<T> {
    /// Submit a job.
    pub async fn submit_job(&self, spec: &JobSpec) -> Result<JobHandle> {
        endpoints::create_job(&*self.transport, spec, self.metrics.as_ref()).await
    }

    /// Fetch one status snapshot for a job.
    pub async fn get_job_status(&self, handle: &JobHandle) -> Result<JobStatus> {
        endpoints::get_job_status(&*self.transport, handle, self.metrics.as_ref()).await
    }

    /// Fetch the raw result set of a finished job.
    pub async fn get_job_results(&self, handle: &JobHandle) -> Result<ResultSet> {
        endpoints::get_job_results(&*self.transport, handle, self.metrics.as_ref()).await
    }

    /// Poll a job until it is done, the deadline expires, or `cancel` fires.
    ///
    /// The first status request is made one full `poll_interval` after this
    /// call, then one per interval. Zero values fall back to the defaults
    /// (1 second cadence, 60 second deadline); deadlines are capped at thirty
    /// years. On timeout or cancellation the
    /// abandon hook, if any, is invoked with `handle`.
    pub async fn wait_for_job(
        &self,
        handle: &JobHandle,
        poll_interval: Duration,
        timeout: Duration,
        mut progress_cb: Option<ProgressCallback<'_>>,
        cancel: Option<&CancellationToken>,
    ) -> Result<JobStatus> {
        let timeout = effective_timeout(timeout);
        // A tick landing on the deadline loses to it, so longer intervals never poll.
        let poll_interval = effective_poll_interval(poll_interval).min(timeout);

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        let mut ticker = tokio::time::interval_at(Instant::now() + poll_interval, poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut polls: u64 = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => return Err(self.abandon(handle, ClientError::Timeout(timeout))),
                _ = CancellationToken::wait(cancel) => return Err(self.abandon(handle, ClientError::Cancelled)),
                _ = ticker.tick() => {}
            }

            let status = tokio::select! {
                biased;
                _ = &mut deadline => return Err(self.abandon(handle, ClientError::Timeout(timeout))),
                _ = CancellationToken::wait(cancel) => return Err(self.abandon(handle, ClientError::Cancelled)),
                status = self.get_job_status(handle) => status?,
            };
            polls += 1;

            debug!(
                job = %handle,
                poll = polls,
                done = status.is_done(),
                events = status.event_count,
                results = status.result_count,
                "Job status"
            );

            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(&status);
            }

            if status.is_done() {
                return Ok(status);
            }
        }
    }

    /// Run one job cycle and return the flattened records.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the cycle: a submit, poll or fetch error,
    /// or [`ClientError::Timeout`] if the job is not done within `timeout`.
    pub async fn run_query(
        &self,
        spec: JobSpec,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Vec<FlatRecord>> {
        self.run_query_with_progress(spec, poll_interval, timeout, None, None)
            .await
    }

    /// [`run_query`](Self::run_query) with status reporting and cancellation.
    pub async fn run_query_with_progress(
        &self,
        spec: JobSpec,
        poll_interval: Duration,
        timeout: Duration,
        progress_cb: Option<ProgressCallback<'_>>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<FlatRecord>> {
        let started = Instant::now();
        let result = self
            .run_cycle(&spec, poll_interval, timeout, progress_cb, cancel)
            .await;
        let elapsed = started.elapsed();

        if let Some(m) = &self.metrics {
            m.record_job(elapsed, result.as_ref().err());
        }

        match &result {
            Ok(records) => info!(
                records = records.len(),
                elapsed_ms = millis(elapsed),
                "Query completed"
            ),
            Err(e) => debug!(error = %e, elapsed_ms = millis(elapsed), "Query failed"),
        }

        result
    }

    async fn run_cycle(
        &self,
        spec: &JobSpec,
        poll_interval: Duration,
        timeout: Duration,
        progress_cb: Option<ProgressCallback<'_>>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<FlatRecord>> {
        debug!(
            query = %redact_query(spec.query()),
            start = %spec.start(),
            end = %spec.end(),
            mode = %spec.query_mode(),
            collect_size = spec.result_cap(),
            "Submitting job"
        );

        let handle = self.submit_job(spec).await?;
        let status = self
            .wait_for_job(&handle, poll_interval, timeout, progress_cb, cancel)
            .await?;

        debug!(job = %handle, duration_ms = status.duration_ms, "Job done, fetching results");
        let results = self.get_job_results(&handle).await?;

        Ok(results.to_records())
    }

    fn abandon(&self, handle: &JobHandle, error: ClientError) -> ClientError {
        warn!(job = %handle, reason = %error, "Abandoning job still running on the server");
        if let Some(hook) = &self.on_abandon {
            hook(handle);
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_durations_use_defaults() {
        assert_eq!(effective_poll_interval(Duration::ZERO), Duration::from_secs(1));
        assert_eq!(effective_timeout(Duration::ZERO), Duration::from_secs(60));
        assert_eq!(
            effective_poll_interval(Duration::from_millis(5)),
            Duration::from_millis(5)
        );
        assert_eq!(effective_timeout(Duration::from_secs(3)), Duration::from_secs(3));
        assert_eq!(effective_timeout(Duration::MAX), MAX_JOB_WAIT);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1830)), 1830);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_redact_query() {
        assert_eq!(redact_query("short"), "short");
        let long = "repo=\"access\" | stats count() by host, status";
        let redacted = redact_query(long);
        assert!(redacted.starts_with("repo=\"access\" | stats c"));
        assert!(redacted.ends_with(&format!("({} bytes)", long.len())));
        assert!(!redacted.contains("status"));
    }
}
