//! Status check outcome

use super::job::JobStatus;

/// Code reported when the request never produced an HTTP response
pub const TRANSPORT_FAILURE_CODE: i32 = -1;

/// Result of one status check
///
/// Pairs the HTTP-layer code with the job status parsed from the body. A
/// transport failure is reported through the code channel
/// ([`TRANSPORT_FAILURE_CODE`]) and never as a job status, so it cannot be
/// confused with a job that genuinely reached ERROR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutcome {
    pub code: i32,
    pub status: Option<JobStatus>,
}

impl ApiOutcome {
    /// Check that received a response
    pub fn response(code: u16, status: Option<JobStatus>) -> Self {
        Self {
            code: i32::from(code),
            status,
        }
    }

    /// Check whose request failed before a response arrived
    pub fn transport_failure() -> Self {
        Self {
            code: TRANSPORT_FAILURE_CODE,
            status: None,
        }
    }

    /// 2xx response
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transport_failure(&self) -> bool {
        self.code == TRANSPORT_FAILURE_CODE
    }

    /// Status carried by a successful check
    ///
    /// A 2xx body without a readable status counts as `Unknown`. Failed checks
    /// carry no status at all.
    pub fn job_status(&self) -> Option<JobStatus> {
        if self.is_success() {
            Some(self.status.unwrap_or(JobStatus::Unknown))
        } else {
            None
        }
    }
}
