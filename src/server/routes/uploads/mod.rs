//! Multipart upload strategies: buffered, chunked and multi-file.

pub mod handlers;
pub mod receive;

use crate::config::UploadsConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Form field carrying the single-file uploads.
pub const SINGLE_FIELD: &str = "upload_file";
/// Repeated form field carrying the multi-file upload.
pub const BATCH_FIELD: &str = "file_uploads";

#[derive(Clone)]
pub struct UploadsState {
    pub cfg: Arc<UploadsConfig>,
}

impl UploadsState {
    pub fn new(cfg: UploadsConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }
}

pub fn router(state: UploadsState) -> Router {
    let body_limit = state.cfg.max_request_size;
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload_buffered))
        .route("/upload2", post(handlers::upload_chunked))
        .route("/upload_file", post(handlers::upload_batch))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
