#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vidsync_api::config::{ServerConfig, ServiceConfig};
use vidsync_api::router::build_app_router;
use vidsync_api::state::AppState;
use vidsync_fal::FalConfig;
use vidsync_pipeline::testing::MockServices;
use vidsync_pipeline::{Pipeline, PipelineStages};
use vidsync_speech::VoiceConfig;
use vidsync_storage::StorageConfig;

/// Trusted storage base used by test requests.
pub const STORAGE_URL: &str = "https://store.test";

/// A trusted image reference for request bodies.
pub const IMAGE_URL: &str = "https://store.test/storage/v1/object/public/user-images/me.png";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:8080` as CORS origin (matching the dev default).
/// Service credentials are placeholders; the stage adapters are replaced
/// by mocks.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        services: ServiceConfig {
            storage: StorageConfig {
                base_url: STORAGE_URL.to_string(),
                api_key: "test-key".to_string(),
                source_images_bucket: "user-images".to_string(),
                generated_audio_bucket: "generated-audio".to_string(),
                final_videos_bucket: "final-videos".to_string(),
            },
            fal: FalConfig {
                api_key: "test-key".to_string(),
                queue_url: "http://127.0.0.1:9".to_string(),
                poll_interval: std::time::Duration::from_millis(5),
            },
            voice: VoiceConfig {
                api_key: "test-key".to_string(),
                base_url: "http://127.0.0.1:9".to_string(),
                voice_id: "voice".to_string(),
                model_id: "model".to_string(),
                stability: 0.5,
                similarity_boost: 0.5,
            },
        },
    }
}

/// Build the full application router with all middleware layers, with
/// every pipeline stage backed by `mocks`.
pub fn build_test_app(mocks: &MockServices) -> Router {
    build_test_app_with(mocks.stages())
}

/// Same as [`build_test_app`] but with caller-assembled stages, for tests
/// that swap a single stage for a custom double.
pub fn build_test_app_with(stages: PipelineStages) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), Pipeline::new(stages));
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
