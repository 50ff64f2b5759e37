pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::corpus::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Multipart framing and the text fields around the resume file.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.resume_max_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/profile", post(matching::handle_build_profile))
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/upload", post(matching::handle_match_upload))
        // Jobs API
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/refresh", post(jobs::handle_refresh))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/jobs/:id/similar", get(jobs::handle_similar_jobs))
        .route("/api/v1/stats", get(jobs::handle_stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
