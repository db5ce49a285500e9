//! Completion watcher
//!
//! Polls the status of one job until it reaches a terminal state.
//!
//! Every iteration sleeps the poll interval, checks the status once and feeds
//! the outcome into a small state machine:
//! - a failed check (non-2xx or transport failure) extends the failure streak,
//!   and the wait aborts once the streak reaches `max_attempts`
//! - a successful check resets the streak, and a status the terminal policy
//!   marks as terminal ends the wait with that status

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};
use yeedu_client::JobApi;
use yeedu_core::domain::{ApiOutcome, Disposition, JobId, JobStatus, TerminalPolicy};

/// Polling parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    /// Pause before each status check
    pub poll_interval: Duration,
    /// Consecutive failed checks that abort the wait
    pub max_attempts: u32,
    /// Optional bound on the whole wait
    pub max_wait: Option<Duration>,
    /// Longest a single status check may take before it counts as failed
    pub request_timeout: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_attempts: 5,
            max_wait: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// States of a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Polling,
    Succeeded,
    FailedTerminal,
    FailedThreshold,
    TimedOut,
}

/// Reasons a wait ends without a terminal job status
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchError {
    #[error("Continuous API failure reached the threshold ({attempts} consecutive failed status checks)")]
    ThresholdExceeded { attempts: u32 },

    #[error("Job did not reach a terminal state within {waited:?}")]
    Timeout { waited: Duration },
}

/// Consecutive failed checks since the last successful one
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FailureStreak {
    count: u32,
}

impl FailureStreak {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Records a failed check and returns the new length of the streak
    pub fn record_failure(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Waits for a job to reach a terminal state
pub struct CompletionWatcher {
    api: Arc<dyn JobApi>,
    settings: WatchSettings,
    policy: TerminalPolicy,
}

impl CompletionWatcher {
    /// Creates a new watcher
    pub fn new(api: Arc<dyn JobApi>, settings: WatchSettings, policy: TerminalPolicy) -> Self {
        Self {
            api,
            settings,
            policy,
        }
    }

    /// Polls until the job reaches a terminal status
    ///
    /// Returns the terminal status, whether it is a success or a failure.
    /// Fails with [`WatchError::ThresholdExceeded`] once `max_attempts`
    /// consecutive status checks fail, and with [`WatchError::Timeout`] when a
    /// `max_wait` is set and exceeded. A status check that does not answer within
    /// `request_timeout` (or the time left before `max_wait`) counts as a failed
    /// check. Without `max_wait`, a job that keeps reporting RUNNING is polled
    /// indefinitely.
    pub async fn wait_for_completion(&self, job_id: &JobId) -> Result<JobStatus, WatchError> {
        info!(
            job_id = %job_id,
            "Waiting for job completion (interval: {:?}, max failed attempts: {})",
            self.settings.poll_interval, self.settings.max_attempts
        );

        let started = Instant::now();
        let mut streak = FailureStreak::default();

        loop {
            time::sleep(self.settings.poll_interval).await;

            let outcome = self.check_status(job_id, started).await;
            info!(job_id = %job_id, code = outcome.code, "Current API status code: {}", outcome.code);

            let state = self.advance(&mut streak, &outcome);

            match (state, outcome.job_status()) {
                (WatchState::FailedThreshold, _) => {
                    warn!(
                        job_id = %job_id,
                        streak = streak.count(),
                        "Continuous API failure reached the threshold"
                    );
                    return Err(WatchError::ThresholdExceeded {
                        attempts: streak.count(),
                    });
                }
                (WatchState::Succeeded | WatchState::FailedTerminal, Some(status)) => {
                    info!(job_id = %job_id, "Current job status: {}", status);
                    debug!(job_id = %job_id, ?state, "Wait finished");
                    return Ok(status);
                }
                (_, Some(status)) => {
                    info!(job_id = %job_id, "Current job status: {}", status);
                }
                (_, None) => {
                    warn!(
                        job_id = %job_id,
                        streak = streak.count(),
                        "Status check failed ({}/{})",
                        streak.count(),
                        self.settings.max_attempts
                    );
                }
            }

            let waited = started.elapsed();
            if self.check_deadline(waited) == WatchState::TimedOut {
                warn!(job_id = %job_id, "Gave up waiting after {:?}", waited);
                return Err(WatchError::Timeout { waited });
            }
        }
    }

    /// Checks the status once, bounded by the request timeout and the time left
    /// before `max_wait`
    async fn check_status(&self, job_id: &JobId, started: Instant) -> ApiOutcome {
        let mut limit = self.settings.request_timeout;
        if let Some(max_wait) = self.settings.max_wait {
            limit = limit.min(max_wait.saturating_sub(started.elapsed()));
        }

        match time::timeout(limit, self.api.get_job_status(job_id)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(job_id = %job_id, "Status request did not answer within {:?}", limit);
                ApiOutcome::transport_failure()
            }
        }
    }

    /// State after `waited` has elapsed with the job still polling
    pub fn check_deadline(&self, waited: Duration) -> WatchState {
        match self.settings.max_wait {
            Some(max_wait) if waited >= max_wait => WatchState::TimedOut,
            _ => WatchState::Polling,
        }
    }

    /// Applies one status check outcome to the streak and returns the next state
    pub fn advance(&self, streak: &mut FailureStreak, outcome: &ApiOutcome) -> WatchState {
        match outcome.job_status() {
            None => {
                if streak.record_failure() >= self.settings.max_attempts {
                    WatchState::FailedThreshold
                } else {
                    WatchState::Polling
                }
            }
            Some(status) => {
                streak.reset();
                match self.policy.disposition(status) {
                    Disposition::Continue => WatchState::Polling,
                    Disposition::Succeeded(_) => WatchState::Succeeded,
                    Disposition::Failed(_) | Disposition::Unclassified => {
                        WatchState::FailedTerminal
                    }
                }
            }
        }
    }
}
