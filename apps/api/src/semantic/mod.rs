//! Semantic similarity: the pluggable text-to-score capability the matchers consume.
//!
//! Backends:
//! - `HashEmbeddingProvider`: in-process feature hashing (deterministic, no model files).
//! - `HttpEmbeddingProvider`: remote text-embeddings-inference server.
//!
//! `MatchingEngine` holds an `Arc<dyn SemanticSimilarityProvider>` chosen at startup.
//! Implementations own their thread-safety; the engine never locks around them.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod hash_provider;
pub mod http_provider;
#[cfg(test)]
pub mod testing;

pub use hash_provider::HashEmbeddingProvider;
pub use http_provider::HttpEmbeddingProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Embedding backend unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("Embedding backend returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Malformed embedding payload: {0}")]
    Malformed(String),
}

/// Best candidate item for one query item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub query: String,
    pub candidate: String,
    pub score: f64,
}

/// Descriptive metadata reported on the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub backend: String,
    pub dimension: Option<usize>,
}

#[async_trait]
pub trait SemanticSimilarityProvider: Send + Sync {
    fn model_info(&self) -> ModelInfo;

    /// Encodes each text into a vector. Output order matches input order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    async fn encode(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut vectors = self.encode_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or(ProviderError::CountMismatch { expected: 1, got: 0 })
    }

    /// Similarity of two texts in [0, 1]. Negative cosine clamps to 0.
    async fn similarity(&self, a: &str, b: &str) -> Result<f64, ProviderError> {
        let vectors = self
            .encode_batch(&[a.to_string(), b.to_string()])
            .await?;
        match vectors.as_slice() {
            [va, vb] => Ok(cosine_similarity(va, vb)),
            _ => Err(ProviderError::CountMismatch {
                expected: 2,
                got: vectors.len(),
            }),
        }
    }

    /// For each query, the candidate with the highest similarity (first wins ties).
    /// Empty output when either list is empty.
    async fn best_match(
        &self,
        queries: &[String],
        candidates: &[String],
    ) -> Result<Vec<SkillMatch>, ProviderError> {
        if queries.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query_vectors = self.encode_batch(queries).await?;
        let candidate_vectors = self.encode_batch(candidates).await?;
        check_count(queries.len(), &query_vectors)?;
        check_count(candidates.len(), &candidate_vectors)?;

        let matches = queries
            .iter()
            .zip(query_vectors.iter())
            .map(|(query, qv)| {
                let mut best_idx = 0;
                let mut best_score = f64::NEG_INFINITY;
                for (idx, cv) in candidate_vectors.iter().enumerate() {
                    let score = cosine_similarity(qv, cv);
                    if score > best_score {
                        best_score = score;
                        best_idx = idx;
                    }
                }
                SkillMatch {
                    query: query.clone(),
                    candidate: candidates[best_idx].clone(),
                    score: best_score,
                }
            })
            .collect();

        Ok(matches)
    }
}

fn check_count(expected: usize, vectors: &[Vec<f32>]) -> Result<(), ProviderError> {
    if vectors.len() != expected {
        return Err(ProviderError::CountMismatch {
            expected,
            got: vectors.len(),
        });
    }
    Ok(())
}

/// Cosine similarity clamped to [0, 1]. Mismatched or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
