use std::sync::Arc;

use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the validated matching config (weights, thresholds, keywords) and the provider.
    /// Handlers read scoring settings through `engine.config()` only.
    pub engine: Arc<MatchingEngine>,
    /// Batch cap enforced before the engine is invoked.
    pub max_batch_size: usize,
}
