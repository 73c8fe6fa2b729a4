pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Resume uploads are small; 10 MiB is plenty for a PDF.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze))
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
