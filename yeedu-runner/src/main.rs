//! Yeedu job runner CLI
//!
//! Runs one Yeedu job configuration to completion and exits non-zero when the
//! job or the run around it fails.
//!
//! Connection values not given as flags are read from `YEEDU_TOKEN`,
//! `YEEDU_HOSTNAME` and `YEEDU_WORKSPACE_ID`.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yeedu_runner::{
    ConfigOverrides, EnvSecretProvider, ExecutionContext, JobRunner, RunError, RunOutcome,
    RunnerConfig,
};

#[derive(Parser)]
#[command(name = "yeedu-run")]
#[command(about = "Submit a Yeedu Spark job and wait for it to finish", long_about = None)]
struct Cli {
    /// Job configuration to run
    #[arg(long, env = "YEEDU_JOB_CONF_ID")]
    job_conf_id: String,

    /// Yeedu API host, with optional scheme and port
    #[arg(long)]
    hostname: Option<String>,

    /// Workspace the job configuration belongs to
    #[arg(long)]
    workspace_id: Option<u64>,

    /// API token
    #[arg(long)]
    token: Option<String>,

    /// Seconds to wait before each status check
    #[arg(long, env = "YEEDU_POLL_INTERVAL")]
    poll_interval: Option<u64>,

    /// Consecutive failed status checks before giving up
    #[arg(long, env = "YEEDU_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Seconds to wait between job completion and the log fetch
    #[arg(long, env = "YEEDU_LOG_FETCH_DELAY")]
    log_fetch_delay: Option<u64>,

    /// Give up after this many seconds even if status checks succeed
    #[arg(long, env = "YEEDU_MAX_WAIT")]
    max_wait: Option<u64>,

    /// Seconds before a single API request is abandoned
    #[arg(long, env = "YEEDU_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// Treat KILLED as a failed job instead of an unclassified stop
    #[arg(long)]
    killed_as_failure: bool,

    /// Identifier of this run, attached to log output
    #[arg(long, env = "YEEDU_RUN_ID")]
    run_id: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            job_conf_id: Some(self.job_conf_id.clone()),
            token: self.token.clone(),
            hostname: self.hostname.clone(),
            workspace_id: self.workspace_id,
            poll_interval: self.poll_interval.map(Duration::from_secs),
            max_attempts: self.max_attempts,
            log_fetch_delay: self.log_fetch_delay.map(Duration::from_secs),
            max_wait: self.max_wait.map(Duration::from_secs),
            request_timeout: self.request_timeout.map(Duration::from_secs),
            killed_as_failure: self.killed_as_failure,
        }
    }

    fn context(&self) -> ExecutionContext {
        let mut context = ExecutionContext::new();
        if let Some(run_id) = &self.run_id {
            context.insert("run_id".to_string(), serde_json::Value::from(run_id.as_str()));
        }
        context
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yeedu_runner=info,yeedu_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = RunnerConfig::resolve(cli.overrides(), &EnvSecretProvider)?;
    info!(
        "Loaded configuration: hostname={}, workspace_id={}, job_conf_id={}",
        config.hostname, config.workspace_id, config.job_conf_id
    );

    let mut runner = JobRunner::from_config(&config)?;

    match runner.execute(&cli.context()).await {
        Ok(RunOutcome::Succeeded { job_id, status, .. }) => {
            println!("{} Job {} finished: {}", "✓".green(), job_id, status.to_string().green());
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Unclassified { job_id, status }) => {
            println!(
                "{} Job {} stopped with unclassified status: {}",
                "?".yellow(),
                job_id,
                status.to_string().yellow()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(RunError::JobFailed {
            job_id,
            status,
            log,
        }) => {
            println!("{} Job {} failed: {}", "✗".red(), job_id, status.to_string().red());
            eprintln!("{}", log);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            Err(e.into())
        }
    }
}
