use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Pipeline routes, mounted at the root.
///
/// ```text
/// GET  /                 -> api_info
/// POST /process-video    -> process_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(video::api_info))
        .route("/process-video", post(video::process_video))
}
