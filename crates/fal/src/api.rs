//! REST client for the generation service's request queue.
//!
//! A call goes through three endpoints: `POST {queue_url}/{app_id}` to
//! enqueue, `GET status_url?logs=1` until the request is completed, then
//! `GET response_url` for the result. [`FalQueueApi::subscribe`] runs all
//! three and blocks the caller until the service reaches a terminal state.

use std::time::Duration;

use vidsync_core::error::StageError;

use crate::messages::{QueueStatus, SubmitResponse};

/// Default queue endpoint.
pub const DEFAULT_QUEUE_URL: &str = "https://queue.fal.run";

/// Default delay between two status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Credential and endpoint settings for the generation service.
#[derive(Debug, Clone)]
pub struct FalConfig {
    /// API key, sent as `Authorization: Key <key>`.
    pub api_key: String,
    /// Queue base URL (default: [`DEFAULT_QUEUE_URL`]).
    pub queue_url: String,
    /// Delay between status polls.
    pub poll_interval: Duration,
}

/// Errors from the queue REST layer.
#[derive(Debug, thiserror::Error)]
pub enum FalError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The request completed but the model run reported an error.
    #[error("Generation request {request_id} failed: {error}")]
    RequestFailed { request_id: String, error: String },
}

impl From<FalError> for StageError {
    fn from(err: FalError) -> Self {
        match err {
            FalError::Request(e) => StageError::Transport(e.to_string()),
            FalError::ApiError { status, body } => StageError::HttpStatus { status, body },
            e @ FalError::RequestFailed { .. } => StageError::Service(e.to_string()),
        }
    }
}

/// HTTP client for the generation queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FalQueueApi {
    client: reqwest::Client,
    config: FalConfig,
}

impl FalQueueApi {
    pub fn new(config: FalConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: FalConfig) -> Self {
        Self { client, config }
    }

    /// Submit `arguments` to `app_id` and wait for the result payload.
    ///
    /// Progress log lines are written to the tracing output as they
    /// arrive and are otherwise ignored. There is no client-side deadline:
    /// the loop ends only when the service reports completion or an HTTP
    /// call fails.
    pub async fn subscribe(
        &self,
        app_id: &str,
        arguments: &serde_json::Value,
    ) -> Result<serde_json::Value, FalError> {
        let submitted = self.submit(app_id, arguments).await?;
        tracing::info!(app_id, request_id = %submitted.request_id, "Generation request queued");

        let mut logs_seen = 0;
        loop {
            let status = self.status(&submitted.status_url).await?;

            let logs = status.logs();
            for entry in logs.iter().skip(logs_seen) {
                tracing::info!(app_id, request_id = %submitted.request_id, "{}", entry.message);
            }
            logs_seen = logs_seen.max(logs.len());

            match status {
                QueueStatus::InQueue { queue_position } => {
                    tracing::debug!(app_id, ?queue_position, "Generation request waiting");
                }
                QueueStatus::InProgress { .. } => {}
                QueueStatus::Completed { error: Some(error), .. } => {
                    return Err(FalError::RequestFailed {
                        request_id: submitted.request_id,
                        error,
                    });
                }
                QueueStatus::Completed { error: None, .. } => break,
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }

        let result = self.result(&submitted.response_url).await?;
        tracing::info!(app_id, request_id = %submitted.request_id, "Generation request completed");
        Ok(result)
    }

    /// Enqueue a request. Sends `POST {queue_url}/{app_id}`.
    pub async fn submit(
        &self,
        app_id: &str,
        arguments: &serde_json::Value,
    ) -> Result<SubmitResponse, FalError> {
        let url = format!("{}/{app_id}", self.config.queue_url.trim_end_matches('/'));

        let response = self
            .authorized(self.client.post(url))
            .json(arguments)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current status including every log line so far.
    pub async fn status(&self, status_url: &str) -> Result<QueueStatus, FalError> {
        let response = self
            .authorized(self.client.get(status_url))
            .query(&[("logs", "1")])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the result payload of a completed request.
    pub async fn result(&self, response_url: &str) -> Result<serde_json::Value, FalError> {
        let response = self.authorized(self.client.get(response_url)).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("Key {}", self.config.api_key),
        )
    }

    /// Parse a successful JSON response body, or turn a non-2xx answer
    /// into a [`FalError::ApiError`] carrying the body text.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FalError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FalError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
