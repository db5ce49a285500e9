//! Scheduler layer for the runner
//!
//! This layer watches a submitted job until it stops. It owns the polling
//! cadence, the consecutive-failure threshold and terminal-state detection.

pub mod watcher;

pub use watcher::{CompletionWatcher, FailureStreak, WatchError, WatchSettings, WatchState};
