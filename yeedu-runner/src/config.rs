//! Runner configuration
//!
//! Defines the connection settings, polling parameters and terminal-state
//! policy of a job run. Credentials and connection values come from an
//! injected [`SecretProvider`] when they are not given explicitly, and are
//! resolved once, before any network call.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use yeedu_core::domain::TerminalPolicy;

use crate::scheduler::WatchSettings;

/// Secret holding the API token
pub const TOKEN_SECRET: &str = "yeedu_token";
/// Secret holding the API hostname
pub const HOSTNAME_SECRET: &str = "yeedu_hostname";
/// Secret holding the workspace id
pub const WORKSPACE_SECRET: &str = "yeedu_workspace_id";
/// Secret holding the job configuration id
pub const JOB_CONF_SECRET: &str = "yeedu_job_conf_id";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_LOG_FETCH_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors, raised before any request is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Source of credentials and connection values supplied by the host
pub trait SecretProvider: Send + Sync {
    /// Looks up a value by name, `None` when it is not set
    fn get_secret(&self, name: &str) -> Option<String>;
}

/// Reads secrets from environment variables
///
/// A secret named `yeedu_token` is read from `YEEDU_TOKEN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
    fn get_secret(&self, name: &str) -> Option<String> {
        std::env::var(name.to_uppercase()).ok()
    }
}

/// In-memory secrets
#[derive(Debug, Default, Clone)]
pub struct StaticSecretProvider {
    values: HashMap<String, String>,
}

impl StaticSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl SecretProvider for StaticSecretProvider {
    fn get_secret(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Values given explicitly by the caller
///
/// Anything left `None` falls back to the secret provider or to a default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub job_conf_id: Option<String>,
    pub token: Option<String>,
    pub hostname: Option<String>,
    pub workspace_id: Option<u64>,
    pub poll_interval: Option<Duration>,
    pub max_attempts: Option<u32>,
    pub log_fetch_delay: Option<Duration>,
    pub max_wait: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub killed_as_failure: bool,
}

/// Resolved runner configuration
#[derive(Clone)]
pub struct RunnerConfig {
    /// Yeedu API host, with or without scheme (e.g., "yeedu.internal:8080")
    pub hostname: String,

    /// Workspace the job configuration belongs to
    pub workspace_id: u64,

    /// API token sent as a bearer credential
    pub token: String,

    /// Job configuration to run
    pub job_conf_id: String,

    /// Pause before each status check
    pub poll_interval: Duration,

    /// Consecutive failed checks that abort the wait
    pub max_attempts: u32,

    /// Pause between the end of the wait and the log fetch, so the service
    /// has flushed the job's logs
    pub log_fetch_delay: Duration,

    /// Upper bound on the whole wait; `None` waits for as long as status checks
    /// keep succeeding
    pub max_wait: Option<Duration>,

    /// Longest a single request may take before it counts as failed
    pub request_timeout: Duration,

    /// Which statuses end the wait and how the run reports them
    pub policy: TerminalPolicy,
}

impl RunnerConfig {
    /// Creates a configuration with default polling parameters
    pub fn new(
        hostname: impl Into<String>,
        workspace_id: u64,
        token: impl Into<String>,
        job_conf_id: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            workspace_id,
            token: token.into(),
            job_conf_id: job_conf_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            log_fetch_delay: DEFAULT_LOG_FETCH_DELAY,
            max_wait: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            policy: TerminalPolicy::standard(),
        }
    }

    /// Resolves the configuration from explicit values and host secrets
    ///
    /// Lookup order for connection values: explicit override, then the
    /// secret provider (`yeedu_token`, `yeedu_hostname`,
    /// `yeedu_workspace_id`, `yeedu_job_conf_id`).
    pub fn resolve(
        overrides: ConfigOverrides,
        secrets: &dyn SecretProvider,
    ) -> Result<Self, ConfigError> {
        let lookup = |value: Option<String>, secret: &str| {
            value.or_else(|| secrets.get_secret(secret))
        };

        let token = lookup(overrides.token, TOKEN_SECRET).ok_or(ConfigError::Missing("token"))?;
        let hostname =
            lookup(overrides.hostname, HOSTNAME_SECRET).ok_or(ConfigError::Missing("hostname"))?;
        let job_conf_id = lookup(overrides.job_conf_id, JOB_CONF_SECRET)
            .ok_or(ConfigError::Missing("job_conf_id"))?;

        let workspace_id = match overrides.workspace_id {
            Some(id) => id,
            None => {
                let raw = secrets
                    .get_secret(WORKSPACE_SECRET)
                    .ok_or(ConfigError::Missing("workspace_id"))?;
                raw.trim().parse::<u64>().map_err(|_| {
                    ConfigError::Invalid(format!("workspace_id must be an integer, got '{}'", raw))
                })?
            }
        };

        let mut config = Self::new(hostname, workspace_id, token, job_conf_id);
        if let Some(interval) = overrides.poll_interval {
            config.poll_interval = interval;
        }
        if let Some(attempts) = overrides.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(delay) = overrides.log_fetch_delay {
            config.log_fetch_delay = delay;
        }
        if let Some(timeout) = overrides.request_timeout {
            config.request_timeout = timeout;
        }
        config.max_wait = overrides.max_wait;
        if overrides.killed_as_failure {
            config.policy = TerminalPolicy::killed_as_failure();
        }

        config.validate()?;
        Ok(config)
    }

    /// Polling parameters for the completion watcher
    pub fn watch_settings(&self) -> WatchSettings {
        WatchSettings {
            poll_interval: self.poll_interval,
            max_attempts: self.max_attempts,
            max_wait: self.max_wait,
            request_timeout: self.request_timeout,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Missing("token"));
        }

        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Missing("hostname"));
        }

        if self.job_conf_id.trim().is_empty() {
            return Err(ConfigError::Missing("job_conf_id"));
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_wait.is_some_and(|wait| wait.is_zero()) {
            return Err(ConfigError::Invalid(
                "max_wait must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("hostname", &self.hostname)
            .field("workspace_id", &self.workspace_id)
            .field("token", &"<redacted>")
            .field("job_conf_id", &self.job_conf_id)
            .field("poll_interval", &self.poll_interval)
            .field("max_attempts", &self.max_attempts)
            .field("log_fetch_delay", &self.log_fetch_delay)
            .field("max_wait", &self.max_wait)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
