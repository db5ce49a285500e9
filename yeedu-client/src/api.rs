//! Job API trait
//!
//! The watcher and runner only need three operations from the service. They
//! depend on this trait rather than on [`YeeduClient`] so that tests can drive
//! them with scripted responses.

use async_trait::async_trait;
use yeedu_core::domain::{ApiOutcome, JobId, LogType};

use crate::YeeduClient;
use crate::error::Result;

/// Operations a job run performs against the service
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submits a job configuration and returns the created job id
    async fn submit_job(&self, job_conf_id: &str) -> Result<JobId>;

    /// Checks the status of a job
    ///
    /// Transport failures are reported through the outcome's code, never as
    /// an error.
    async fn get_job_status(&self, job_id: &JobId) -> ApiOutcome;

    /// Reads one log stream of a job
    async fn get_job_logs(&self, job_id: &JobId, log_type: LogType) -> Result<String>;
}

#[async_trait]
impl JobApi for YeeduClient {
    async fn submit_job(&self, job_conf_id: &str) -> Result<JobId> {
        YeeduClient::submit_job(self, job_conf_id).await
    }

    async fn get_job_status(&self, job_id: &JobId) -> ApiOutcome {
        YeeduClient::get_job_status(self, job_id).await
    }

    async fn get_job_logs(&self, job_id: &JobId, log_type: LogType) -> Result<String> {
        YeeduClient::get_job_logs(self, job_id, log_type).await
    }
}
