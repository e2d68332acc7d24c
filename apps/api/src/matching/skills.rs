//! Skills matcher: exact set overlap with a semantic fallback for the gaps.
//!
//! Algorithm:
//! 1. No required skills → 1.0, nothing matched or missing.
//! 2. exact = |candidate ∩ job| / |job|
//! 3. If anything is missing and the candidate lists skills, ask the provider
//!    for the best candidate skill per missing job skill; accept ≥ 0.7.
//! 4. score = exact × 0.7 + mean(accepted) × 0.3, clamped to [0, 1].
//!    With nothing missing, score = exact and the provider is not called.

use std::collections::HashSet;

use tracing::debug;

use crate::semantic::{ProviderError, SemanticSimilarityProvider};

/// Minimum similarity for a semantic fallback match.
pub const SEMANTIC_MATCH_THRESHOLD: f64 = 0.7;
const EXACT_SHARE: f64 = 0.7;
const SEMANTIC_SHARE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsOutcome {
    pub score: f64,
    /// Job-skill tokens: exact matches first, then semantic matches, each in job order.
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Both inputs must already be normalized (see `models::profile::normalize_skills`).
pub async fn score_skills(
    candidate_skills: &[String],
    job_skills: &[String],
    provider: &dyn SemanticSimilarityProvider,
) -> Result<SkillsOutcome, ProviderError> {
    if job_skills.is_empty() {
        return Ok(SkillsOutcome {
            score: 1.0,
            matched: vec![],
            missing: vec![],
        });
    }

    let owned: HashSet<&str> = candidate_skills.iter().map(String::as_str).collect();
    let (mut matched, exact_missing): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|skill| owned.contains(skill.as_str()));

    let exact_score = matched.len() as f64 / job_skills.len() as f64;

    if exact_missing.is_empty() || candidate_skills.is_empty() {
        return Ok(SkillsOutcome {
            score: exact_score,
            matched,
            missing: exact_missing,
        });
    }

    let best = provider
        .best_match(&exact_missing, candidate_skills)
        .await?;

    let accepted: Vec<_> = best
        .iter()
        .filter(|m| m.score >= SEMANTIC_MATCH_THRESHOLD)
        .collect();

    for m in &accepted {
        debug!(
            "Semantic skill match: '{}' ~ '{}' ({:.3})",
            m.query, m.candidate, m.score
        );
    }

    let semantic_score = if accepted.is_empty() {
        0.0
    } else {
        accepted.iter().map(|m| m.score).sum::<f64>() / accepted.len() as f64
    };

    let accepted_skills: HashSet<&str> = accepted.iter().map(|m| m.query.as_str()).collect();
    let (semantic_matched, missing): (Vec<String>, Vec<String>) = exact_missing
        .into_iter()
        .partition(|skill| accepted_skills.contains(skill.as_str()));
    matched.extend(semantic_matched);

    let score = (exact_score * EXACT_SHARE + semantic_score * SEMANTIC_SHARE).clamp(0.0, 1.0);

    Ok(SkillsOutcome {
        score,
        matched,
        missing,
    })
}
