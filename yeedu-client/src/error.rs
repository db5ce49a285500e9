//! Error types for the Yeedu client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Yeedu client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Submission was answered, but not with HTTP 200 and a job id
    #[error("Job submission failed (status {status}): {body}")]
    Submission {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Failed to read a response body
    #[error("Failed to read response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create a submission error from status code and raw body
    pub fn submission(status: u16, body: impl Into<String>) -> Self {
        Self::Submission {
            status,
            body: body.into(),
        }
    }

    /// Check if this error happened at the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}
