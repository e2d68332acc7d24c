pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/match/single", post(handlers::handle_match_single))
        .route("/api/match/batch", post(handlers::handle_match_batch))
        .route("/api/match/explain", post(handlers::handle_explain_match))
        .route("/api/match/test", post(handlers::handle_test_match))
        .with_state(state)
}
