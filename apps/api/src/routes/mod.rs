pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scan + report API
        .route("/api/v1/scan", post(handlers::handle_scan))
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route("/api/v1/candidate/:id", get(handlers::handle_get_candidate))
        .route(
            "/api/v1/candidate/:id/metrics",
            get(handlers::handle_candidate_metrics),
        )
        .route(
            "/api/v1/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .with_state(state)
}
