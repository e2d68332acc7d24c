//! Deterministic providers for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ModelInfo, ProviderError, SemanticSimilarityProvider, SkillMatch};

/// Similarity looked up from a fixed table of unordered pairs; anything
/// not listed scores `default`. Counts every similarity query it answers.
pub struct StubProvider {
    pairs: Vec<(String, String, f64)>,
    default: f64,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(default: f64) -> Self {
        Self {
            pairs: Vec::new(),
            default,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_pair(mut self, a: &str, b: &str, score: f64) -> Self {
        self.pairs.push((a.to_string(), b.to_string(), score));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, a: &str, b: &str) -> f64 {
        self.pairs
            .iter()
            .find(|(x, y, _)| (x == a && y == b) || (x == b && y == a))
            .map(|(_, _, s)| *s)
            .unwrap_or(self.default)
    }
}

#[async_trait]
impl SemanticSimilarityProvider for StubProvider {
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "stub".to_string(),
            backend: "test".to_string(),
            dimension: None,
        }
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|_| vec![0.0]).collect())
    }

    async fn similarity(&self, a: &str, b: &str) -> Result<f64, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(a, b))
    }

    async fn best_match(
        &self,
        queries: &[String],
        candidates: &[String],
    ) -> Result<Vec<SkillMatch>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        Ok(queries
            .iter()
            .map(|q| {
                let mut best = SkillMatch {
                    query: q.clone(),
                    candidate: candidates[0].clone(),
                    score: self.lookup(q, &candidates[0]),
                };
                for c in &candidates[1..] {
                    let score = self.lookup(q, c);
                    if score > best.score {
                        best.candidate = c.clone();
                        best.score = score;
                    }
                }
                best
            })
            .collect())
    }
}

/// Always fails, as an unreachable inference backend would.
pub struct FailingProvider;

#[async_trait]
impl SemanticSimilarityProvider for FailingProvider {
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "failing".to_string(),
            backend: "test".to_string(),
            dimension: None,
        }
    }

    async fn encode_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Err(ProviderError::Unavailable { retries: 3 })
    }
}
