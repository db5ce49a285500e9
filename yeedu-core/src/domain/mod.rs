//! Core domain types
//!
//! This module contains the structures the client and runner exchange while
//! observing a remote job: how a job is addressed, which states it can report,
//! what a single status check produced, and which states end a wait.

pub mod job;
pub mod policy;
pub mod outcome;

pub use job::{JobId, JobStatus, LogType};
pub use policy::{Disposition, TerminalPolicy};
pub use outcome::ApiOutcome;
