//! Data models for the Pandora search API.
//!
//! # What this module handles:
//! - Job submission parameters and the server-assigned handle
//! - Job status snapshots
//! - Columnar result sets and their cell values
//! - Service error bodies
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::transport`])
//! - Response classification (see [`crate::endpoints`])

mod common;
mod jobs;
mod results;

pub use common::ServiceError;
pub use jobs::{CreateJobRequest, CreateJobResponse, JobHandle, JobProcess, JobSpec, JobStatus, QueryMode};
pub use results::{FieldDescriptor, FieldFlag, FlatRecord, ResultSet, Value};
