//! Spark job API endpoints

use reqwest::{Method, StatusCode};
use tracing::{debug, warn};
use yeedu_core::domain::{ApiOutcome, JobId, LogType};
use yeedu_core::dto::job::{JobStatusResponse, SubmitJob, SubmitJobResponse};

use crate::YeeduClient;
use crate::error::{ClientError, Result};

impl YeeduClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a run of a pre-registered job configuration
    ///
    /// Succeeds only when the service answers HTTP 200 with a non-empty
    /// `job_id`. Submission is never retried: a second call creates a second
    /// remote job.
    ///
    /// # Arguments
    /// * `job_conf_id` - The job configuration to run
    ///
    /// # Returns
    /// The id of the created job
    pub async fn submit_job(&self, job_conf_id: &str) -> Result<JobId> {
        let response = self
            .request(Method::POST, "spark/job")
            .json(&SubmitJob {
                job_conf_id: job_conf_id.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to read submit response: {}", e)))?;

        if status != StatusCode::OK {
            return Err(ClientError::submission(status.as_u16(), body));
        }

        let parsed: SubmitJobResponse = serde_json::from_str(&body).unwrap_or_default();
        match parsed.created_job_id() {
            Some(job_id) => {
                debug!(job_id = %job_id, "Job submitted");
                Ok(job_id.clone())
            }
            None => Err(ClientError::submission(status.as_u16(), body)),
        }
    }

    /// Check the status of a job
    ///
    /// Never fails: a request that produces no response is reported as
    /// [`ApiOutcome::transport_failure`], a non-2xx response as an outcome
    /// without status. A 2xx body that cannot be read carries no status.
    ///
    /// # Arguments
    /// * `job_id` - The job to check
    pub async fn get_job_status(&self, job_id: &JobId) -> ApiOutcome {
        let path = format!("spark/job/{}", job_id);
        let response = match self.request(Method::GET, &path).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(job_id = %job_id, "Status request failed: {}", e);
                return ApiOutcome::transport_failure();
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ApiOutcome::response(status.as_u16(), None);
        }

        match response.json::<JobStatusResponse>().await {
            Ok(body) => ApiOutcome::response(status.as_u16(), body.job_status),
            Err(e) => {
                warn!(job_id = %job_id, "Failed to parse status response: {}", e);
                ApiOutcome::response(status.as_u16(), None)
            }
        }
    }

    // =============================================================================
    // Job Logs
    // =============================================================================

    /// Get one log stream of a job
    ///
    /// Returns the raw body whatever the HTTP status; logs are best-effort.
    ///
    /// # Arguments
    /// * `job_id` - The job to read logs of
    /// * `log_type` - Which stream to read
    pub async fn get_job_logs(&self, job_id: &JobId, log_type: LogType) -> Result<String> {
        let path = format!("spark/job/{}/log/{}", job_id, log_type);
        let response = self.request(Method::GET, &path).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(job_id = %job_id, code = status.as_u16(), "Log endpoint answered with a non-success status");
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to read job logs: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yeedu_core::domain::JobStatus;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WORKSPACE: &str = "/api/v1/workspace/3";

    fn client_for(server: &MockServer) -> YeeduClient {
        YeeduClient::new(&server.uri(), 3, "test-token")
    }

    #[tokio::test]
    async fn test_submit_returns_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/spark/job", WORKSPACE)))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({ "job_conf_id": "17" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_id": 42,
                "job_conf_id": 17
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job_id = client_for(&server).submit_job("17").await.unwrap();
        assert_eq!(job_id, JobId::Numeric(42));
    }

    #[tokio::test]
    async fn test_submit_without_job_id_fails_with_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/spark/job", WORKSPACE)))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"queued"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server).submit_job("17").await.unwrap_err();
        match err {
            ClientError::Submission { status, body } => {
                assert_eq!(status, 200);
                assert_eq!(body, r#"{"message":"queued"}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_non_200_fails_even_with_job_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/spark/job", WORKSPACE)))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "job_id": 42 })))
            .mount(&server)
            .await;

        let err = client_for(&server).submit_job("17").await.unwrap_err();
        assert!(matches!(err, ClientError::Submission { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_submit_non_json_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/spark/job", WORKSPACE)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).submit_job("17").await.unwrap_err();
        assert!(matches!(err, ClientError::Submission { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_status_parses_job_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42", WORKSPACE)))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "job_id": 42,
                "job_status": "DONE"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).get_job_status(&JobId::Numeric(42)).await;
        assert_eq!(outcome, ApiOutcome::response(200, Some(JobStatus::Done)));
    }

    #[tokio::test]
    async fn test_status_reports_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42", WORKSPACE)))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = client_for(&server).get_job_status(&JobId::Numeric(42)).await;
        assert_eq!(outcome.code, 503);
        assert!(!outcome.is_success());
        assert!(!outcome.is_transport_failure());
    }

    #[tokio::test]
    async fn test_status_maps_transport_failure_to_sentinel() {
        // Nothing listens on port 1
        let client = YeeduClient::new("http://127.0.0.1:1", 3, "test-token");
        let outcome = client.get_job_status(&JobId::Numeric(42)).await;
        assert!(outcome.is_transport_failure());
        assert_eq!(outcome.code, -1);
        assert_eq!(outcome.status, None);
    }

    #[tokio::test]
    async fn test_status_past_request_timeout_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42", WORKSPACE)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "job_status": "RUNNING" }))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = YeeduClient::with_timeout(
            &server.uri(),
            3,
            "test-token",
            std::time::Duration::from_millis(200),
        )
        .unwrap();
        let outcome = client.get_job_status(&JobId::Numeric(42)).await;
        assert!(outcome.is_transport_failure());
    }

    #[tokio::test]
    async fn test_status_with_unreadable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42", WORKSPACE)))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).get_job_status(&JobId::Numeric(42)).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.job_status(), Some(JobStatus::Unknown));
    }

    #[tokio::test]
    async fn test_get_logs_returns_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42/log/stderr", WORKSPACE)))
            .respond_with(ResponseTemplate::new(200).set_body_string("Traceback: boom\n"))
            .mount(&server)
            .await;

        let logs = client_for(&server)
            .get_job_logs(&JobId::Numeric(42), LogType::Stderr)
            .await
            .unwrap();
        assert_eq!(logs, "Traceback: boom\n");
    }

    #[tokio::test]
    async fn test_get_logs_does_not_validate_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{}/spark/job/42/log/stdout", WORKSPACE)))
            .respond_with(ResponseTemplate::new(404).set_body_string("log not found"))
            .mount(&server)
            .await;

        let logs = client_for(&server)
            .get_job_logs(&JobId::Numeric(42), LogType::Stdout)
            .await
            .unwrap();
        assert_eq!(logs, "log not found");
    }
}
