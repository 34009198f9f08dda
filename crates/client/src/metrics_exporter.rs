//! Prometheus exposition of the metrics recorded by [`crate::metrics::MetricsCollector`].
//!
//! Installing the exporter registers a global recorder and serves the
//! Prometheus text format at `http://<bind>/metrics`. Must be called from
//! inside a tokio runtime.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::{METRIC_JOB_DURATION, METRIC_REQUEST_DURATION};

const REQUEST_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

const JOB_BUCKETS: &[f64] = &[0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0, 300.0];

/// Handle for the installed Prometheus exporter.
#[derive(Debug)]
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// # Errors
    /// Returns an error if the bind address is invalid, another recorder is
    /// already installed, or the listener fails to start.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                REQUEST_BUCKETS,
            )?
            .set_buckets_for_metric(Matcher::Full(METRIC_JOB_DURATION.to_string()), JOB_BUCKETS)?
            .with_http_listener(addr)
            .install()?;

        info!("Prometheus metrics exporter listening on http://{addr}/metrics");

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    #[error("Failed to start Prometheus exporter: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        match err {
            metrics_exporter_prometheus::BuildError::FailedToSetGlobalRecorder(_) => {
                MetricsExporterError::RecorderAlreadyInstalled
            }
            other => MetricsExporterError::BuildError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bind_address() {
        let result = MetricsExporter::install("not-a-valid-addr");
        assert!(matches!(
            result,
            Err(MetricsExporterError::InvalidBindAddress(_, _))
        ));
    }

    #[test]
    fn test_error_display() {
        let parse_error = "invalid".parse::<SocketAddr>().unwrap_err();
        let error = MetricsExporterError::InvalidBindAddress("metrics".to_string(), parse_error);
        assert!(error.to_string().contains("Invalid bind address 'metrics'"));

        assert_eq!(
            MetricsExporterError::RecorderAlreadyInstalled.to_string(),
            "A metrics recorder is already installed"
        );
    }
}
