use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Text encoded to check that the similarity backend answers.
const HEALTH_CHECK_TEXT: &str = "health check";

/// GET /
/// Service banner with the available endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "matchmaker-api",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "match_single": "/api/match/single",
            "match_batch": "/api/match/batch",
            "explain": "/api/match/explain",
            "test": "/api/match/test"
        }
    }))
}

/// GET /health
/// Reports the similarity backend and the active scoring configuration.
/// `model.status` is `loaded` when the backend encodes a sample text, `error` otherwise.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let provider = state.engine.provider();
    let info = provider.model_info();
    let model_status = match provider.encode(HEALTH_CHECK_TEXT).await {
        Ok(_) => "loaded",
        Err(e) => {
            tracing::warn!("Similarity backend health check failed: {e}");
            "error"
        }
    };

    let matching = state.engine.config();
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "name": info.name,
            "backend": info.backend,
            "dimension": info.dimension,
            "status": model_status
        },
        "weights": matching.weights,
        "thresholds": matching.thresholds,
        "max_batch_size": state.max_batch_size
    }))
}
