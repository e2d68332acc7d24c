//! Axum route handlers for the Matching API.

use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::normalize_skills;
use crate::models::{BatchSummary, Candidate, Job, MatchExplanation, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SingleMatchRequest {
    pub candidate: Candidate,
    pub job: Job,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub candidates: Vec<Candidate>,
    pub job: Job,
}

#[derive(Debug, Deserialize)]
pub struct ExplainMatchRequest {
    pub candidate: Candidate,
    pub job: Job,
    #[serde(default = "default_include_suggestions")]
    pub include_suggestions: bool,
}

fn default_include_suggestions() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct TestMatchResponse {
    pub message: String,
    pub result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/match/single
pub async fn handle_match_single(
    State(state): State<AppState>,
    Json(request): Json<SingleMatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state
        .engine
        .match_single(&request.candidate, &request.job)
        .await?;
    Ok(Json(result))
}

/// POST /api/match/batch
///
/// Returns candidates ranked by compatibility, highest first.
pub async fn handle_match_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchMatchRequest>,
) -> Result<Json<BatchSummary>, AppError> {
    validate_batch(&request.candidates, state.max_batch_size)?;

    let summary = state
        .engine
        .match_batch(&request.candidates, &request.job)
        .await?;
    Ok(Json(summary))
}

/// POST /api/match/explain
///
/// Detailed analysis with strengths, weaknesses, suggestions and a hiring decision.
pub async fn handle_explain_match(
    State(state): State<AppState>,
    Json(request): Json<ExplainMatchRequest>,
) -> Result<Json<MatchExplanation>, AppError> {
    let explanation = state
        .engine
        .explain_match(&request.candidate, &request.job, request.include_suggestions)
        .await?;
    Ok(Json(explanation))
}

/// POST /api/match/test
///
/// Runs a built-in sample pair. Useful as a smoke test after deploys.
pub async fn handle_test_match(
    State(state): State<AppState>,
) -> Result<Json<TestMatchResponse>, AppError> {
    let (candidate, job) = sample_pair();
    let result = state.engine.match_single(&candidate, &job).await?;
    info!("Test match score: {:.2}", result.compatibility_score);

    Ok(Json(TestMatchResponse {
        message: "Test match successful".to_string(),
        result,
    }))
}

/// Rejects empty batches, oversized batches and duplicate candidate ids.
pub fn validate_batch(candidates: &[Candidate], max_batch_size: usize) -> Result<(), AppError> {
    if candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates must contain at least one candidate".to_string(),
        ));
    }

    if candidates.len() > max_batch_size {
        return Err(AppError::Validation(format!(
            "Maximum {max_batch_size} candidates per batch request"
        )));
    }

    let mut seen = HashSet::new();
    for candidate in candidates {
        if !seen.insert(candidate.id.as_str()) {
            return Err(AppError::Validation(format!(
                "Candidate IDs must be unique (duplicate: {})",
                candidate.id
            )));
        }
    }

    Ok(())
}

fn sample_pair() -> (Candidate, Job) {
    let candidate = Candidate {
        id: "test-001".to_string(),
        name: "Juan Pérez".to_string(),
        skills: normalize_skills(["python", "javascript", "react", "sql"]),
        experience_years: 5.0,
        summary: Some("Full-stack developer with 5 years of web development experience".to_string()),
        ..Default::default()
    };

    let job = Job {
        id: "job-001".to_string(),
        title: "Full Stack Developer".to_string(),
        description: "We are looking for a developer experienced in Python and React".to_string(),
        skills: normalize_skills(["python", "react", "node.js"]),
        requirements: vec![
            "5 years of experience".to_string(),
            "Intermediate English".to_string(),
        ],
        ..Default::default()
    };

    (candidate, job)
}
