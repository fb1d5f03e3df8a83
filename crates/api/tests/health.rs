//! Integration tests for the static endpoints and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use tower::ServiceExt;
use vidsync_pipeline::testing::MockServices;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_healthy_without_touching_stages() {
    let mocks = MockServices::succeeding();
    let response = get(common::build_test_app(&mocks), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Video processing server is running");
    assert!(json["version"].is_string());
    assert!(mocks.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Test: GET / describes the endpoint contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_describes_required_params() {
    let mocks = MockServices::succeeding();
    let response = get(common::build_test_app(&mocks), "/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Video Processing API");
    for field in ["image_url", "effects_prompt", "message"] {
        assert!(
            json["required_params"][field].is_string(),
            "missing description for {field}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let mocks = MockServices::succeeding();
    let response = get(common::build_test_app(&mocks), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET on the pipeline endpoint is not allowed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_process_video_returns_405() {
    let mocks = MockServices::succeeding();
    let response = get(common::build_test_app(&mocks), "/process-video").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(mocks.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let mocks = MockServices::succeeding();
    let response = get(common::build_test_app(&mocks), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let mocks = MockServices::succeeding();
    let app = common::build_test_app(&mocks);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/process-video")
        .header("Origin", "http://localhost:8080")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .expect("Missing Access-Control-Allow-Origin header")
            .to_str()
            .unwrap(),
        "http://localhost:8080"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
    assert!(
        headers.get("access-control-allow-credentials").is_none(),
        "Credentials must not be allowed cross-origin"
    );
    assert!(mocks.calls().is_empty());
}
