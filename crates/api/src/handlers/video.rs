//! Handlers for the narrated-video pipeline.
//!
//! Routes:
//! - `POST /process-video`: run the full pipeline for one request
//! - `GET  /`: describe the endpoint contract

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use vidsync_core::request::ProcessVideoRequest;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Successful pipeline response.
#[derive(Debug, Serialize)]
pub struct ProcessVideoResponse {
    pub success: bool,
    pub video_url: String,
}

/// POST /process-video
///
/// Validates the three required fields before anything else, then runs
/// the pipeline to completion. The request is answered only once the
/// final video is stored or a stage has failed.
pub async fn process_video(
    State(state): State<AppState>,
    body: Result<Json<ProcessVideoRequest>, JsonRejection>,
) -> AppResult<Json<ProcessVideoResponse>> {
    let Json(input) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Malformed process-video body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let request = input.into_pipeline_request()?;
    tracing::info!(image_url = %request.image_url, "Processing video request");

    let video_url = state.pipeline.run(&request).await?;

    Ok(Json(ProcessVideoResponse {
        success: true,
        video_url: video_url.into_string(),
    }))
}

/// GET /
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Video Processing API",
        "endpoints": {
            "process_video": "POST /process-video - Process image with effects and audio",
            "health": "GET /health - Health check",
        },
        "required_params": {
            "image_url": "String - Storage URL of uploaded image",
            "effects_prompt": "String - Video effects description",
            "message": "String - Text to convert to speech",
        },
    }))
}
