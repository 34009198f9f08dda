//! REST API endpoint implementations.

mod jobs;
pub mod request;
pub mod url_encoding;

pub use jobs::{create_job, get_job_results, get_job_status, job_path, job_results_path};
pub use request::classify_response;
