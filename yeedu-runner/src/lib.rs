//! Yeedu Runner
//!
//! Submits a Yeedu Spark job, waits for it to finish and reports its logs.
//!
//! Architecture:
//! - Configuration: connection values, polling parameters and terminal policy,
//!   resolved from explicit values and an injected secret provider
//! - Scheduler: the completion watcher, which polls job status with a fixed
//!   interval and a consecutive-failure threshold
//! - Services: the job runner, which sequences submit, wait and log fetch
//!
//! # Example
//!
//! ```no_run
//! use yeedu_runner::{ConfigOverrides, EnvSecretProvider, ExecutionContext, JobRunner};
//!
//! # async fn example() -> Result<(), yeedu_runner::RunError> {
//! let overrides = ConfigOverrides {
//!     job_conf_id: Some("17".to_string()),
//!     ..Default::default()
//! };
//! let mut runner = JobRunner::build(overrides, &EnvSecretProvider)?;
//! let outcome = runner.execute(&ExecutionContext::new()).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::{
    ConfigError, ConfigOverrides, EnvSecretProvider, RunnerConfig, SecretProvider,
    StaticSecretProvider,
};
pub use error::RunError;
pub use scheduler::{CompletionWatcher, WatchError, WatchSettings};
pub use service::{ExecutionContext, JobRunner, RunOutcome};
