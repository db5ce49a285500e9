//! Scripted job API for tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use yeedu_client::{ClientError, JobApi};
use yeedu_core::domain::{ApiOutcome, JobId, LogType};

/// Answers calls from a script
///
/// Status checks pop outcomes in order; once the script is down to its last
/// outcome, that outcome repeats forever. A hanging script never answers
/// status checks at all.
pub struct ScriptedApi {
    submit_error: Mutex<Option<ClientError>>,
    hang_status: bool,
    job_id: JobId,
    statuses: Mutex<VecDeque<ApiOutcome>>,
    logs: HashMap<LogType, String>,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
    log_requests: Mutex<Vec<LogType>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            submit_error: Mutex::new(None),
            hang_status: false,
            job_id: JobId::Numeric(42),
            statuses: Mutex::new(VecDeque::new()),
            logs: HashMap::new(),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            log_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submit_error(self, err: ClientError) -> Self {
        self.fail_next_submit(err);
        self
    }

    /// Fails the next submission, from a shared reference
    pub fn fail_next_submit(&self, err: ClientError) {
        *self.submit_error.lock().unwrap() = Some(err);
    }

    /// Status checks never resolve
    pub fn with_hanging_status(mut self) -> Self {
        self.hang_status = true;
        self
    }

    pub fn with_statuses(self, outcomes: impl IntoIterator<Item = ApiOutcome>) -> Self {
        self.statuses.lock().unwrap().extend(outcomes);
        self
    }

    pub fn with_log(mut self, log_type: LogType, text: &str) -> Self {
        self.logs.insert(log_type, text.to_string());
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn log_requests(&self) -> Vec<LogType> {
        self.log_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobApi for ScriptedApi {
    async fn submit_job(&self, _job_conf_id: &str) -> yeedu_client::Result<JobId> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match self.submit_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.job_id.clone()),
        }
    }

    async fn get_job_status(&self, job_id: &JobId) -> ApiOutcome {
        assert_eq!(job_id, &self.job_id);
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        if self.hang_status {
            std::future::pending::<()>().await;
        }

        let mut statuses = self.statuses.lock().unwrap();
        match statuses.len() {
            0 => ApiOutcome::transport_failure(),
            1 => statuses[0].clone(),
            _ => statuses.pop_front().unwrap_or_else(ApiOutcome::transport_failure),
        }
    }

    async fn get_job_logs(&self, job_id: &JobId, log_type: LogType) -> yeedu_client::Result<String> {
        assert_eq!(job_id, &self.job_id);
        self.log_requests.lock().unwrap().push(log_type);
        Ok(self.logs.get(&log_type).cloned().unwrap_or_default())
    }
}
