//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a submitted job
///
/// The service hands out integer ids, but the value is treated as opaque and a
/// string id is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Numeric(u64),
    Text(String),
}

impl JobId {
    /// Whether the id carries a usable value
    ///
    /// The service signals "no job created" with `0` or an empty string as
    /// well as by omitting the field.
    pub fn is_present(&self) -> bool {
        match self {
            JobId::Numeric(id) => *id != 0,
            JobId::Text(id) => !id.trim().is_empty(),
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Numeric(id) => write!(f, "{}", id),
            JobId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        JobId::Numeric(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId::Text(id.to_string())
    }
}

/// Job status as reported by the service
///
/// Any value the service reports that is not listed here (queue and startup
/// states, for instance) is folded into `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum JobStatus {
    Running,
    Done,
    Error,
    Terminated,
    Killed,
    Unknown,
}

impl JobStatus {
    /// Every status, in declaration order
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Running,
        JobStatus::Done,
        JobStatus::Error,
        JobStatus::Terminated,
        JobStatus::Killed,
        JobStatus::Unknown,
    ];

    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "RUNNING",
            JobStatus::Done => "DONE",
            JobStatus::Error => "ERROR",
            JobStatus::Terminated => "TERMINATED",
            JobStatus::Killed => "KILLED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for JobStatus {
    fn from(value: &str) -> Self {
        match value {
            "RUNNING" => JobStatus::Running,
            "DONE" => JobStatus::Done,
            "ERROR" => JobStatus::Error,
            "TERMINATED" => JobStatus::Terminated,
            "KILLED" => JobStatus::Killed,
            _ => JobStatus::Unknown,
        }
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        JobStatus::from(value.as_str())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which log stream of a job to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Stdout,
    Stderr,
}

impl LogType {
    /// Path segment used by the log endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Stdout => "stdout",
            LogType::Stderr => "stderr",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
