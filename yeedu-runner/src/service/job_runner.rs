//! Job runner
//!
//! Runs one job configuration end to end:
//! - Submits it and records the created job id
//! - Waits for the job to reach a terminal state
//! - Reads the log stream the final status maps to
//! - Fails with that log when the job failed
//!
//! This is the entry point a host scheduler calls.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{Instrument, error, info, info_span};
use yeedu_client::{JobApi, YeeduClient};
use yeedu_core::domain::{Disposition, JobId, JobStatus, TerminalPolicy};

use crate::config::{ConfigOverrides, RunnerConfig, SecretProvider};
use crate::error::RunError;
use crate::scheduler::CompletionWatcher;

/// Values handed in by the host scheduler for one run
pub type ExecutionContext = HashMap<String, serde_json::Value>;

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The job finished successfully
    Succeeded {
        job_id: JobId,
        status: JobStatus,
        logs: String,
    },
    /// The job stopped with a status that is neither a known success nor a
    /// known failure; no logs were read
    Unclassified { job_id: JobId, status: JobStatus },
}

/// Submits a job and follows it to completion
pub struct JobRunner {
    api: Arc<dyn JobApi>,
    job_conf_id: String,
    watcher: CompletionWatcher,
    policy: TerminalPolicy,
    log_fetch_delay: Duration,
    job_id: Option<JobId>,
}

impl JobRunner {
    /// Creates a runner on top of an existing API implementation
    pub fn new(api: Arc<dyn JobApi>, config: &RunnerConfig) -> Self {
        let watcher = CompletionWatcher::new(
            Arc::clone(&api),
            config.watch_settings(),
            config.policy.clone(),
        );

        Self {
            api,
            job_conf_id: config.job_conf_id.clone(),
            watcher,
            policy: config.policy.clone(),
            log_fetch_delay: config.log_fetch_delay,
            job_id: None,
        }
    }

    /// Creates a runner talking to the Yeedu API described by `config`
    ///
    /// Every request gives up after `config.request_timeout`.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, RunError> {
        let client = YeeduClient::with_timeout(
            &config.hostname,
            config.workspace_id,
            config.token.clone(),
            config.request_timeout,
        )
        .map_err(RunError::Client)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Resolves configuration from explicit values and host secrets, then
    /// creates the runner
    ///
    /// Fails with [`RunError::Config`] before any request is made when a
    /// required value is missing.
    pub fn build(overrides: ConfigOverrides, secrets: &dyn SecretProvider) -> Result<Self, RunError> {
        let config = RunnerConfig::resolve(overrides, secrets)?;
        Self::from_config(&config)
    }

    /// Id of the job submitted by the last `execute`, once known
    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    /// Runs the job configuration to completion
    ///
    /// # Returns
    /// The outcome of a run that did not fail. A job that reached a failure
    /// terminal fails with [`RunError::JobFailed`] carrying its stderr log.
    pub async fn execute(&mut self, context: &ExecutionContext) -> Result<RunOutcome, RunError> {
        let run_id = context
            .get("run_id")
            .and_then(|value| value.as_str())
            .unwrap_or("-")
            .to_string();
        let span = info_span!("job_run", job_conf_id = %self.job_conf_id, run_id = %run_id);

        self.run().instrument(span).await
    }

    async fn run(&mut self) -> Result<RunOutcome, RunError> {
        self.job_id = None;

        let job_id = match self.api.submit_job(&self.job_conf_id).await {
            Ok(job_id) => job_id,
            Err(err) => {
                error!(transport = err.is_transport(), "Job submission failed: {}", err);
                return Err(RunError::Submission(err));
            }
        };
        info!("JOB ID: {}", job_id);
        self.job_id = Some(job_id.clone());

        let status = self.watcher.wait_for_completion(&job_id).await?;
        info!("FINAL JOB STATUS: {}", status);

        let disposition = self.policy.disposition(status);
        let Some(log_type) = disposition.log_type() else {
            error!(job_id = %job_id, "Job completion status is unknown: {}", status);
            return Ok(RunOutcome::Unclassified { job_id, status });
        };

        time::sleep(self.log_fetch_delay).await;
        let logs = self
            .api
            .get_job_logs(&job_id, log_type)
            .await
            .map_err(|source| RunError::Logs {
                job_id: job_id.clone(),
                source,
            })?;
        info!(
            "Logs for Job ID {} (Log Type: {}): {}",
            job_id, log_type, logs
        );

        match disposition {
            Disposition::Failed(_) => Err(RunError::JobFailed {
                job_id,
                status,
                log: logs,
            }),
            _ => Ok(RunOutcome::Succeeded {
                job_id,
                status,
                logs,
            }),
        }
    }
}
