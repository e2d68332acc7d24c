use crate::config::{MatchingWeights, QualityThresholds};
use crate::models::{MatchBreakdown, QualityTier};

/// Fixed share of the location sub-score added on top of the weighted blend.
pub const LOCATION_BOOST: f64 = 0.05;

/// Weighted blend of the four primary sub-scores plus the optional location
/// boost, clamped to [0, 1].
pub fn overall_score(breakdown: &MatchBreakdown, weights: &MatchingWeights) -> f64 {
    let mut score = breakdown.skills_match * weights.skills
        + breakdown.experience_match * weights.experience
        + breakdown.education_match * weights.education
        + breakdown.semantic_match * weights.semantic;

    if let Some(location) = breakdown.location_match {
        score += location * LOCATION_BOOST;
    }

    score.clamp(0.0, 1.0)
}

pub fn classify(score: f64, thresholds: &QualityThresholds) -> QualityTier {
    if score >= thresholds.excellent {
        QualityTier::Excellent
    } else if score >= thresholds.good {
        QualityTier::Good
    } else if score >= thresholds.min {
        QualityTier::Medium
    } else {
        QualityTier::Low
    }
}

/// Integer percentage, truncated.
pub fn percentage(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).floor() as u32
}
