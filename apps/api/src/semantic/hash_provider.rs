use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use siphasher::sip::SipHasher13;

use super::{ModelInfo, ProviderError, SemanticSimilarityProvider};

/// Fixed keys so vectors are stable across processes and Rust versions.
/// Changing them changes every embedding.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

/// Word tokens count more than the character trigrams derived from them.
const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing embedder.
///
/// Each lower-cased word contributes itself plus its padded character
/// trigrams, so near-spellings ("postgres" / "postgresql") land close
/// together. Vectors are sign-hashed and L2-normalised.
pub struct HashEmbeddingProvider {
    dimension: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(&self, feature: &str, salt: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        salt.hash(&mut hasher);
        feature.hash(&mut hasher);
        hasher.finish()
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let idx = (self.hash(feature, 0) % self.dimension as u64) as usize;
        let sign = if self.hash(feature, 1) % 2 == 0 { 1.0 } else { -1.0 };
        vector[idx] += sign * weight;
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for word in tokenize(text) {
            self.add_feature(&mut vector, &format!("w:{word}"), WORD_WEIGHT);
            for trigram in trigrams(&word) {
                self.add_feature(&mut vector, &format!("t:{trigram}"), TRIGRAM_WEIGHT);
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl SemanticSimilarityProvider for HashEmbeddingProvider {
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "feature-hash-v1".to_string(),
            backend: "hash".to_string(),
            dimension: Some(self.dimension),
        }
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

/// Lower-cased alphanumeric runs. `+`, `#` and `.` stay inside words so
/// "c++", "c#" and "node.js" survive as tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|w| w.trim_matches('.'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn trigrams(word: &str) -> Vec<String> {
    let padded: Vec<char> = format!("^{word}$").chars().collect();
    padded
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::cosine_similarity;

    #[test]
    fn test_embedding_is_normalized() {
        let provider = HashEmbeddingProvider::new(128);
        let v = provider.embed("Senior Rust engineer, distributed systems");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let provider = HashEmbeddingProvider::new(16);
        assert!(provider.embed("  ,, ").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let a = HashEmbeddingProvider::new(64).embed("kubernetes");
        let b = HashEmbeddingProvider::new(64).embed("kubernetes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_tokenize_keeps_language_symbols() {
        assert_eq!(tokenize("C++, C# and Node.js."), vec!["c++", "c#", "and", "node.js"]);
    }

    #[test]
    fn test_trigrams_are_padded() {
        assert_eq!(trigrams("go"), vec!["^go", "go$"]);
    }

    #[test]
    fn test_near_spelling_beats_unrelated_skill() {
        let provider = HashEmbeddingProvider::new(384);
        let target = provider.embed("postgresql");
        let close = cosine_similarity(&target, &provider.embed("postgres"));
        let far = cosine_similarity(&target, &provider.embed("photoshop"));
        assert!(close > far, "close {close} vs far {far}");
    }

    #[tokio::test]
    async fn test_identical_texts_are_fully_similar() {
        let provider = HashEmbeddingProvider::new(384);
        let sim = provider
            .similarity("Madrid, Spain", "Madrid, Spain")
            .await
            .unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_floor_is_one() {
        let provider = HashEmbeddingProvider::new(0);
        assert_eq!(provider.model_info().dimension, Some(1));
    }
}
