//! Route definitions for the Crop Health Monitor

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Room for multipart boundaries and the crop type field on top of the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create API routes
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/analyze", analysis_routes(max_upload_bytes))
        .nest("/crops", crop_routes())
}

/// Analysis routes
fn analysis_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::analyze_image))
        .route("/features", post(handlers::analyze_features))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}

/// Crop catalog routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_type/care-tips", get(handlers::get_care_tips))
}
