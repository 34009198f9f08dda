//! Pandora search REST API client.
//!
//! This crate submits a query job to a Pandora server, polls it until it is
//! done or a deadline expires, and flattens the columnar result into
//! key-value records.

pub mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod projection;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use cancellation::CancellationToken;
pub use client::{PandoraClient, ProgressCallback};
pub use client::builder::{AbandonHook, PandoraClientBuilder};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    FieldDescriptor, FieldFlag, FlatRecord, JobHandle, JobProcess, JobSpec, JobStatus, QueryMode,
    ResultSet, ServiceError, Value,
};
pub use projection::project;
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport, TransportError};
