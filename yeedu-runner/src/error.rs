//! Error types for a job run

use thiserror::Error;
use yeedu_client::ClientError;
use yeedu_core::domain::{JobId, JobStatus};

use crate::config::ConfigError;
use crate::scheduler::WatchError;

/// Ways a job run can fail
#[derive(Debug, Error)]
pub enum RunError {
    /// Required configuration was missing or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] ClientError),

    /// The job could not be submitted; never retried
    #[error("Job submission failed: {0}")]
    Submission(#[source] ClientError),

    /// The wait gave up before the job reached a terminal state
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// The job's logs could not be read
    #[error("Failed to fetch logs for job {job_id}: {source}")]
    Logs {
        job_id: JobId,
        #[source]
        source: ClientError,
    },

    /// The job reached a failure terminal; the message is the job's log
    #[error("{log}")]
    JobFailed {
        job_id: JobId,
        status: JobStatus,
        log: String,
    },
}
