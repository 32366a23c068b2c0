pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/analyze", post(handlers::handle_analyze_cv))
        .route(
            "/api/v1/projects/generate",
            post(handlers::handle_generate_projects),
        )
        .route("/api/v1/projects", post(handlers::handle_cv_projects))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
