//! Terminal-state policy
//!
//! A single table decides, for every [`JobStatus`], whether a wait keeps
//! polling and, once it stops, which log stream the run reads and whether the
//! run counts as a success. The watcher and the runner both consult it, so the
//! terminal set and the log-type mapping can never drift apart.

use std::collections::HashMap;

use super::job::{JobStatus, LogType};

/// What a status means for a run in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Non-terminal, keep polling
    Continue,
    /// Terminal success, read the given log stream
    Succeeded(LogType),
    /// Terminal failure, read the given log stream and fail the run with it
    Failed(LogType),
    /// Terminal, but neither a known success nor a known failure
    Unclassified,
}

impl Disposition {
    /// Whether a wait stops when it sees this disposition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Disposition::Continue)
    }

    /// Log stream to fetch after the wait, if any
    pub fn log_type(&self) -> Option<LogType> {
        match self {
            Disposition::Succeeded(log_type) | Disposition::Failed(log_type) => Some(*log_type),
            Disposition::Continue | Disposition::Unclassified => None,
        }
    }
}

/// Status to disposition table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPolicy {
    table: HashMap<JobStatus, Disposition>,
}

impl TerminalPolicy {
    /// Default table
    ///
    /// | status     | disposition      |
    /// |------------|------------------|
    /// | RUNNING    | continue         |
    /// | UNKNOWN    | continue         |
    /// | DONE       | succeeded/stdout |
    /// | ERROR      | failed/stderr    |
    /// | TERMINATED | failed/stderr    |
    /// | KILLED     | unclassified     |
    ///
    /// KILLED ends the wait but has no log mapping, so a killed job finishes
    /// the run without fetching logs or failing. Use
    /// [`TerminalPolicy::killed_as_failure`] to treat it like ERROR.
    pub fn standard() -> Self {
        let table = HashMap::from([
            (JobStatus::Running, Disposition::Continue),
            (JobStatus::Unknown, Disposition::Continue),
            (JobStatus::Done, Disposition::Succeeded(LogType::Stdout)),
            (JobStatus::Error, Disposition::Failed(LogType::Stderr)),
            (JobStatus::Terminated, Disposition::Failed(LogType::Stderr)),
            (JobStatus::Killed, Disposition::Unclassified),
        ]);
        Self { table }
    }

    /// Standard table with KILLED mapped to a stderr failure
    pub fn killed_as_failure() -> Self {
        Self::standard().with(JobStatus::Killed, Disposition::Failed(LogType::Stderr))
    }

    /// Overrides the disposition of one status
    pub fn with(mut self, status: JobStatus, disposition: Disposition) -> Self {
        self.table.insert(status, disposition);
        self
    }

    /// Looks up the disposition of a status
    pub fn disposition(&self, status: JobStatus) -> Disposition {
        self.table
            .get(&status)
            .copied()
            .unwrap_or(Disposition::Continue)
    }

    /// Whether a wait stops on this status
    pub fn is_terminal(&self, status: JobStatus) -> bool {
        self.disposition(status).is_terminal()
    }
}

impl Default for TerminalPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
