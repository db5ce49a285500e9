//! Spark job DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobId, JobStatus};

/// Request to run a pre-registered job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJob {
    pub job_conf_id: String,
}

/// Body returned by the submit endpoint
///
/// Only `job_id` is read; the service sends more fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    #[serde(default)]
    pub job_id: Option<JobId>,
}

impl SubmitJobResponse {
    /// The created job id, if the body actually carries one
    pub fn created_job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref().filter(|id| id.is_present())
    }
}

/// Body returned by the job status endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobStatusResponse {
    #[serde(default)]
    pub job_status: Option<JobStatus>,
}
