//! Matching engine: composes the calculators into single, batch and explain operations.
//!
//! Constructed once at startup with a validated `MatchingConfig` and a shared
//! provider handle; stateless between calls otherwise.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ConfigError, MatchingConfig};
use crate::explain::{self, Explanation, MatchFacts};
use crate::matching::aggregate::{classify, overall_score, percentage};
use crate::matching::education::score_education;
use crate::matching::experience::score_experience;
use crate::matching::location::score_location;
use crate::matching::profile::score_profile;
use crate::matching::ranker::{average_score, rank, top_matched_skills, TOP_SKILLS_LIMIT};
use crate::matching::skills::{score_skills, SkillsOutcome};
use crate::matching::MatchError;
use crate::models::{BatchSummary, Candidate, Job, MatchBreakdown, MatchExplanation, MatchResult};
use crate::semantic::SemanticSimilarityProvider;

pub struct MatchingEngine {
    config: MatchingConfig,
    provider: Arc<dyn SemanticSimilarityProvider>,
}

impl MatchingEngine {
    /// Fails if the weights do not sum to 1.0 (±0.01) or the thresholds are unordered.
    pub fn new(
        config: MatchingConfig,
        provider: Arc<dyn SemanticSimilarityProvider>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn SemanticSimilarityProvider {
        self.provider.as_ref()
    }

    /// Scores one candidate against one job.
    pub async fn match_single(&self, candidate: &Candidate, job: &Job) -> Result<MatchResult, MatchError> {
        info!("Matching candidate {} with job {}", candidate.id, job.id);
        let (result, _) = self.evaluate(candidate, job).await?;
        info!(
            "Match completed: candidate={}, score={:.2}, quality={}",
            result.candidate_id, result.compatibility_score, result.match_quality
        );
        Ok(result)
    }

    /// Scores every candidate against the job and ranks them.
    ///
    /// Candidates are scored in input order. Callers validate ids and batch size first.
    pub async fn match_batch(&self, candidates: &[Candidate], job: &Job) -> Result<BatchSummary, MatchError> {
        info!("Batch matching {} candidates with job {}", candidates.len(), job.id);

        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let (result, _) = self.evaluate(candidate, job).await?;
            results.push(result);
        }

        let average = average_score(&results);
        let top_skills = top_matched_skills(&results, TOP_SKILLS_LIMIT);
        let matches = rank(results);

        info!("Batch match completed: job={}, avg_score={:.2}", job.id, average);

        Ok(BatchSummary {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            total_candidates: candidates.len(),
            matches,
            average_score: average,
            top_skills_matched: top_skills,
        })
    }

    /// In-depth analysis with strengths, weaknesses and a hiring decision.
    pub async fn explain_match(
        &self,
        candidate: &Candidate,
        job: &Job,
        include_suggestions: bool,
    ) -> Result<MatchExplanation, MatchError> {
        info!("Explaining match of candidate {} with job {}", candidate.id, job.id);
        let (result, explanation) = self.evaluate(candidate, job).await?;

        let detailed_analysis = explain::detailed_analysis(
            &result.breakdown,
            result.matched_skills.len(),
            result.missing_skills.len(),
            candidate.experience_years,
            candidate.education.len(),
        );

        Ok(MatchExplanation {
            candidate_id: result.candidate_id,
            job_id: result.job_id,
            compatibility_score: result.compatibility_score,
            match_percentage: result.match_percentage,
            breakdown: result.breakdown,
            detailed_analysis,
            strengths: explanation.strengths,
            weaknesses: explanation.weaknesses,
            suggestions: if include_suggestions {
                explanation.recommendations
            } else {
                Vec::new()
            },
            decision_recommendation: explain::decision(result.match_quality).to_string(),
        })
    }

    async fn breakdown(
        &self,
        candidate: &Candidate,
        job: &Job,
    ) -> Result<(MatchBreakdown, SkillsOutcome), MatchError> {
        let provider = self.provider.as_ref();
        let keywords = &self.config.keywords;

        let skills = score_skills(&candidate.skills, &job.skills, provider).await?;
        let experience = score_experience(candidate.experience_years, job.min_experience_years);
        let education = score_education(candidate, job, keywords, provider).await?;
        let semantic = score_profile(candidate, job, provider).await?;
        let location = score_location(
            candidate.location.as_deref(),
            job.location.as_deref(),
            keywords,
            provider,
        )
        .await?;

        debug!(
            "Sub-scores for {}: skills={:.3} experience={:.3} education={:.3} semantic={:.3} location={:.3}",
            candidate.id, skills.score, experience, education, semantic, location
        );

        let breakdown = MatchBreakdown {
            skills_match: skills.score,
            experience_match: experience,
            education_match: education,
            semantic_match: semantic,
            location_match: Some(location),
        };
        Ok((breakdown, skills))
    }

    async fn evaluate(
        &self,
        candidate: &Candidate,
        job: &Job,
    ) -> Result<(MatchResult, Explanation), MatchError> {
        let (breakdown, skills) = self.breakdown(candidate, job).await?;

        let score = overall_score(&breakdown, &self.config.weights);
        let quality = classify(score, &self.config.thresholds);
        let match_percentage = percentage(score);

        let explanation = explain::explain(&MatchFacts {
            candidate_name: &candidate.name,
            job_title: &job.title,
            percentage: match_percentage,
            breakdown: &breakdown,
            matched_skills: &skills.matched,
            missing_skills: &skills.missing,
            quality,
            min_experience_years: job.min_experience_years,
        });

        let result = MatchResult {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            job_id: job.id.clone(),
            compatibility_score: score,
            match_percentage,
            breakdown,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            explanation: explanation.narrative.clone(),
            recommendations: explanation.recommendations.clone(),
            match_quality: quality,
        };
        Ok((result, explanation))
    }
}
