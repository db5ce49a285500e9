//! Service layer
//!
//! Services sequence the client and the watcher into a complete job run:
//! submit, wait, read logs, report.

mod job_runner;

pub use job_runner::{ExecutionContext, JobRunner, RunOutcome};
