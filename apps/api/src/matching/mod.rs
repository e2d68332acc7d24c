// Candidate/job matching: one calculator per dimension, the aggregator,
// the batch ranker and the engine that composes them.
// All semantic calls go through semantic::SemanticSimilarityProvider.

use thiserror::Error;

use crate::semantic::ProviderError;

pub mod aggregate;
pub mod education;
pub mod engine;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod profile;
pub mod ranker;
pub mod skills;

pub use engine::MatchingEngine;

/// The only runtime failure a match can produce.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Semantic similarity provider failed: {0}")]
    Provider(#[from] ProviderError),
}
