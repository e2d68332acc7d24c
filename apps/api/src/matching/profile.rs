use crate::models::{Candidate, Job};
use crate::semantic::{ProviderError, SemanticSimilarityProvider};

pub const NEUTRAL_SCORE: f64 = 0.5;

/// Overall semantic alignment between the candidate's narrative and the job text.
pub async fn score_profile(
    candidate: &Candidate,
    job: &Job,
    provider: &dyn SemanticSimilarityProvider,
) -> Result<f64, ProviderError> {
    let candidate_text = candidate_text(candidate);
    let job_text = job_text(job);

    if candidate_text.is_empty() || job_text.is_empty() {
        return Ok(NEUTRAL_SCORE);
    }

    let score = provider.similarity(&candidate_text, &job_text).await?;
    Ok(score.clamp(0.0, 1.0))
}

/// Summary followed by one "{position} at {company}. {description}" line per role.
pub fn candidate_text(candidate: &Candidate) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(summary) = candidate.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            parts.push(summary.to_string());
        }
    }

    for exp in &candidate.experience {
        let position = exp.position.trim();
        let company = exp.company.trim();
        let description = exp.description.as_deref().unwrap_or("").trim();
        if position.is_empty() && company.is_empty() && description.is_empty() {
            continue;
        }
        parts.push(
            format!("{position} at {company}. {description}")
                .trim_end()
                .to_string(),
        );
    }

    parts.join(" ")
}

/// Title, description and requirements, skipping blank pieces.
pub fn job_text(job: &Job) -> String {
    let requirements = job.requirements.join(" ");
    [job.title.trim(), job.description.trim(), requirements.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(". ")
}
