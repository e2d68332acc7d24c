mod config;
mod errors;
mod explain;
mod matching;
mod models;
mod routes;
mod semantic;
mod state;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EmbeddingBackend, EmbeddingConfig};
use crate::matching::MatchingEngine;
use crate::routes::build_router;
use crate::semantic::{HashEmbeddingProvider, HttpEmbeddingProvider, SemanticSimilarityProvider};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable values or invalid weights)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchmaker API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize similarity provider
    let provider = build_provider(&config.embedding)?;
    let model = provider.model_info();
    info!("Similarity provider initialized (backend: {}, model: {})", model.backend, model.name);

    // Initialize matching engine (sole owner of weights, thresholds and keywords)
    let engine = MatchingEngine::new(config.matching.clone(), provider)?;
    info!(
        "Matching weights: skills={} experience={} education={} semantic={}",
        config.matching.weights.skills,
        config.matching.weights.experience,
        config.matching.weights.education,
        config.matching.weights.semantic
    );

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        max_batch_size: config.max_batch_size,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn SemanticSimilarityProvider>> {
    let provider: Arc<dyn SemanticSimilarityProvider> = match &config.backend {
        EmbeddingBackend::Hash => Arc::new(HashEmbeddingProvider::new(config.dimension)),
        EmbeddingBackend::Http { url } => Arc::new(HttpEmbeddingProvider::new(
            url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?),
    };
    Ok(provider)
}

/// No configured origins means any origin is allowed.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let allowed = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}
