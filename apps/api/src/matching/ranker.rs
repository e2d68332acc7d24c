use crate::models::{MatchResult, RankedMatchResult};

/// Number of skills reported in a batch's top-matched list.
pub const TOP_SKILLS_LIMIT: usize = 10;

/// Sorts descending by compatibility score and assigns ranks 1..=N.
/// The sort is stable, so equal scores keep their input order.
pub fn rank(results: Vec<MatchResult>) -> Vec<RankedMatchResult> {
    let mut results = results;
    results.sort_by(|a, b| {
        b.compatibility_score
            .partial_cmp(&a.compatibility_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
        .into_iter()
        .enumerate()
        .map(|(idx, result)| RankedMatchResult {
            rank: idx + 1,
            result,
        })
        .collect()
}

/// Arithmetic mean of the compatibility scores; 0.0 for an empty batch.
pub fn average_score(results: &[MatchResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.compatibility_score).sum::<f64>() / results.len() as f64
}

/// Most frequently matched skills across the batch, scanned in input order.
/// Ties keep first-seen order.
pub fn top_matched_skills(results: &[MatchResult], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for skill in results.iter().flat_map(|r| r.matched_skills.iter()) {
        match counts.iter_mut().find(|(s, _)| *s == skill.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((skill.as_str(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(skill, _)| skill.to_string())
        .collect()
}
