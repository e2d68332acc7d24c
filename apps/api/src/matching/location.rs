use crate::config::KeywordSets;
use crate::semantic::{ProviderError, SemanticSimilarityProvider};

pub const UNKNOWN_CANDIDATE_SCORE: f64 = 0.5;
pub const PARTIAL_MATCH_SCORE: f64 = 0.8;
/// Down-weights a purely semantic location match.
pub const SEMANTIC_FALLBACK_SCALE: f64 = 0.6;

/// Location compatibility.
///
/// Order: no job location → 1.0; unknown candidate location → 0.5; remote job → 1.0;
/// equal → 1.0; substring either way → 0.8; otherwise semantic similarity × 0.6.
pub async fn score_location(
    candidate_location: Option<&str>,
    job_location: Option<&str>,
    keywords: &KeywordSets,
    provider: &dyn SemanticSimilarityProvider,
) -> Result<f64, ProviderError> {
    let job_loc = match job_location.map(normalize).filter(|l| !l.is_empty()) {
        Some(l) => l,
        None => return Ok(1.0),
    };
    let candidate_loc = match candidate_location.map(normalize).filter(|l| !l.is_empty()) {
        Some(l) => l,
        None => return Ok(UNKNOWN_CANDIDATE_SCORE),
    };

    if is_remote(&job_loc, &keywords.remote) {
        return Ok(1.0);
    }

    if candidate_loc == job_loc {
        return Ok(1.0);
    }

    if candidate_loc.contains(&job_loc) || job_loc.contains(&candidate_loc) {
        return Ok(PARTIAL_MATCH_SCORE);
    }

    let similarity = provider.similarity(&candidate_loc, &job_loc).await?;
    Ok((similarity * SEMANTIC_FALLBACK_SCALE).clamp(0.0, 1.0))
}

fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

pub fn is_remote(job_location: &str, remote_keywords: &[String]) -> bool {
    remote_keywords
        .iter()
        .any(|k| job_location.contains(k.as_str()))
}
