use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidsync_core::error::CoreError;
use vidsync_pipeline::PipelineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidsync_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A pipeline run that stopped at one of its stages.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut stage = None;

        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // The caller only learns that the reference was refused.
            AppError::Core(CoreError::InvalidReference(_))
            | AppError::Pipeline(PipelineError::InvalidReference(_)) => {
                tracing::warn!(reason = %self, "Image reference rejected");
                (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    "Invalid image URL".to_string(),
                )
            }

            AppError::Pipeline(err @ PipelineError::Stage { stage: failed, .. }) => {
                tracing::error!(stage = %failed, error = %err, "Pipeline stage failed");
                stage = Some(*failed);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STAGE_FAILED",
                    err.to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(stage) = stage {
            body["stage"] = json!(stage);
        }

        (status, axum::Json(body)).into_response()
    }
}
