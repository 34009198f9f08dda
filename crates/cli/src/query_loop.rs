//! Scheduled query loop.
//!
//! Responsibilities:
//! - Run one job cycle per period over the window `[now - window, now]`.
//! - Print each cycle's records and keep going after failed cycles.
//!
//! Does NOT handle:
//! - Job polling or result flattening (see `pandora_client`).
//!
//! Invariants:
//! - Cycles never overlap; the next one starts `window` after the previous ended.
//! - Cancellation ends the loop with `ClientError::Cancelled`, whether it
//!   arrives during a cycle or while sleeping.
//! - In `once` mode the first cycle's error is returned unchanged.

use anyhow::{Context, Result};
use chrono::Utc;
use pandora_client::{
    CancellationToken, ClientError, JobSpec, JobStatus, PandoraClient, ProgressCallback,
    QueryMode, Transport,
};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, warn};

use crate::output::write_records;

/// Per-run settings for the loop.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Length of the query window, also the pause between cycles.
    pub window: Duration,
    pub poll_interval: Duration,
    pub job_timeout: Duration,
    pub collect_size: u64,
    pub mode: QueryMode,
    /// Stop after the first cycle.
    pub once: bool,
    /// Print every record instead of only the first.
    pub print_all: bool,
}

/// Run the loop until cancelled, or for a single cycle when `once` is set.
pub async fn run<T, W>(
    client: &PandoraClient<T>,
    settings: &LoopSettings,
    query: &str,
    cancel: &CancellationToken,
    out: &mut W,
) -> Result<()>
where
    T: Transport,
    W: Write,
{
    let mut cycle: u64 = 0;
    loop {
        cycle += 1;
        let spec = JobSpec::for_window(query, Utc::now(), settings.window)
            .collect_size(settings.collect_size)
            .mode(settings.mode);

        let mut report = |status: &JobStatus| {
            debug!(
                cycle,
                duration_ms = status.duration_ms,
                scanned = status.scan_count,
                results = status.result_count,
                "Job progress"
            );
        };
        let progress: ProgressCallback<'_> = &mut report;

        let outcome = client
            .run_query_with_progress(
                spec,
                settings.poll_interval,
                settings.job_timeout,
                Some(progress),
                Some(cancel),
            )
            .await;

        match outcome {
            Ok(records) => {
                debug!(cycle, records = records.len(), "Cycle finished");
                write_records(out, &records, settings.print_all)
                    .context("Failed to write results")?;
            }
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled.into()),
            Err(e) if settings.once => return Err(e.into()),
            Err(e) => warn!(cycle, error = %e, "Query cycle failed"),
        }

        if settings.once {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled.into()),
            _ = tokio::time::sleep(settings.window) => {}
        }
    }
}
