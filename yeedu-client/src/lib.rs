//! Yeedu HTTP Client
//!
//! A small, type-safe HTTP client for the Yeedu Spark job API.
//!
//! The client is stateless: every call is an independent authenticated request
//! against a workspace-scoped base URL. It covers the three operations a job
//! run needs (submit, status check, log fetch) and exposes them behind the
//! [`JobApi`] trait so callers can swap in a fake.
//!
//! # Example
//!
//! ```no_run
//! use yeedu_client::YeeduClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YeeduClient::new("yeedu.example.com:8080", 3, "secret-token");
//!
//!     let job_id = client.submit_job("17").await?;
//!     let outcome = client.get_job_status(&job_id).await;
//!
//!     println!("Job {} answered with HTTP {}", job_id, outcome.code);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use api::JobApi;
pub use error::{ClientError, Result};
pub use yeedu_core::domain::{ApiOutcome, JobId, JobStatus, LogType};

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};

/// HTTP client for the Yeedu Spark job API
///
/// Every request carries the bearer token and JSON accept/content-type
/// headers. No state is kept between calls.
#[derive(Clone)]
pub struct YeeduClient {
    /// Workspace-scoped base URL (e.g., "http://host:8080/api/v1/workspace/3")
    base_url: String,
    /// API token sent as a bearer credential
    token: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for YeeduClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YeeduClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl YeeduClient {
    /// Create a new Yeedu client
    ///
    /// # Arguments
    /// * `hostname` - Host (and optional port) of the Yeedu API. A leading
    ///   `http://` or `https://` is kept, otherwise `http://` is assumed.
    /// * `workspace_id` - Workspace the jobs belong to
    /// * `token` - API token
    ///
    /// # Example
    /// ```
    /// use yeedu_client::YeeduClient;
    ///
    /// let client = YeeduClient::new("localhost:8080", 3, "token");
    /// assert_eq!(client.base_url(), "http://localhost:8080/api/v1/workspace/3");
    /// ```
    pub fn new(hostname: &str, workspace_id: u64, token: impl Into<String>) -> Self {
        Self::with_client(hostname, workspace_id, token, Client::new())
    }

    /// Create a new Yeedu client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use yeedu_client::YeeduClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = YeeduClient::with_client("https://yeedu.example.com", 3, "token", http_client);
    /// assert_eq!(client.base_url(), "https://yeedu.example.com/api/v1/workspace/3");
    /// ```
    pub fn with_client(
        hostname: &str,
        workspace_id: u64,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: workspace_url(hostname, workspace_id),
            token: token.into(),
            client,
        }
    }

    /// Create a new Yeedu client whose requests give up after `timeout`
    ///
    /// A request that times out fails like any other transport error.
    ///
    /// # Example
    /// ```
    /// use yeedu_client::YeeduClient;
    /// use std::time::Duration;
    ///
    /// let client = YeeduClient::with_timeout("localhost:8080", 3, "token", Duration::from_secs(30))?;
    /// assert_eq!(client.base_url(), "http://localhost:8080/api/v1/workspace/3");
    /// # Ok::<(), yeedu_client::ClientError>(())
    /// ```
    pub fn with_timeout(
        hostname: &str,
        workspace_id: u64,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(hostname, workspace_id, token, client))
    }

    /// Get the workspace-scoped base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for a path below the workspace URL
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.token)
    }
}

/// Workspace-scoped API root for a hostname
fn workspace_url(hostname: &str, workspace_id: u64) -> String {
    let hostname = hostname.trim().trim_end_matches('/');
    let root = if hostname.starts_with("http://") || hostname.starts_with("https://") {
        hostname.to_string()
    } else {
        format!("http://{}", hostname)
    };
    format!("{}/api/v1/workspace/{}", root, workspace_id)
}
