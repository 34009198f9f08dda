//! Job endpoints: submit, status and results.

use tracing::debug;

use super::request::{encode_body, send};
use super::url_encoding::encode_path_segment;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{CreateJobRequest, CreateJobResponse, JobHandle, JobSpec, JobStatus, ResultSet};
use crate::transport::{ApiRequest, Transport};
use pandora_config::constants::JOBS_API_PATH;

const JOB_STATUS_ENDPOINT: &str = "/api/v1/jobs/{id}";
const JOB_RESULTS_ENDPOINT: &str = "/api/v1/jobs/{id}/results";

/// Path of the status resource for `handle`.
pub fn job_path(handle: &JobHandle) -> String {
    format!("{JOBS_API_PATH}/{}", encode_path_segment(handle.as_str()))
}

/// Path of the results resource for `handle`.
pub fn job_results_path(handle: &JobHandle) -> String {
    format!("{}/results", job_path(handle))
}

/// Submit a job and return the handle the service assigned to it.
pub async fn create_job<T: Transport>(
    transport: &T,
    spec: &JobSpec,
    metrics: Option<&MetricsCollector>,
) -> Result<JobHandle> {
    let body = encode_body(&CreateJobRequest::from(spec))?;

    let response: CreateJobResponse = send(
        transport,
        ApiRequest::post_json(JOBS_API_PATH, body),
        JOBS_API_PATH,
        metrics,
    )
    .await?;

    if response.id.as_str().is_empty() {
        return Err(ClientError::InvalidResponse(
            "job submission returned an empty id".to_string(),
        ));
    }

    debug!(job = %response.id, "Job submitted");
    Ok(response.id)
}

/// Fetch the current status of a job.
pub async fn get_job_status<T: Transport>(
    transport: &T,
    handle: &JobHandle,
    metrics: Option<&MetricsCollector>,
) -> Result<JobStatus> {
    if let Some(m) = metrics {
        m.record_poll();
    }
    send(
        transport,
        ApiRequest::get(job_path(handle)),
        JOB_STATUS_ENDPOINT,
        metrics,
    )
    .await
}

/// Fetch the results of a finished job.
pub async fn get_job_results<T: Transport>(
    transport: &T,
    handle: &JobHandle,
    metrics: Option<&MetricsCollector>,
) -> Result<ResultSet> {
    send(
        transport,
        ApiRequest::get(job_results_path(handle)),
        JOB_RESULTS_ENDPOINT,
        metrics,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_paths_encode_the_id() {
        let handle = JobHandle::new("a/b c");
        assert_eq!(job_path(&handle), "/api/v1/jobs/a%2Fb%20c");
        assert_eq!(job_results_path(&handle), "/api/v1/jobs/a%2Fb%20c/results");
    }
}
