//! Explainer: narrative, strengths, weaknesses and recommendations for a scored match.
//!
//! Everything here is a pure function of the breakdown, the skill lists and the
//! quality tier. Phrasing lives in `templates`. Thresholds are fixed and independent
//! of the configurable quality-tier thresholds.

use std::collections::BTreeMap;

use crate::models::{MatchBreakdown, QualityTier};

pub mod templates;

use templates as t;

const MAX_LISTED_MATCHED: usize = 5;
const MAX_LISTED_MISSING: usize = 3;

const EXPERIENCE_EXCEEDS_AT: f64 = 0.8;
const EXPERIENCE_MEETS_AT: f64 = 0.6;

const STRONG_SKILLS_AT: f64 = 0.7;
const STRONG_SEMANTIC_AT: f64 = 0.7;
const MANY_SKILLS_OVER: usize = 5;

const WEAK_SKILLS_BELOW: f64 = 0.5;
const WEAK_EDUCATION_BELOW: f64 = 0.5;

const RECOMMEND_EXPERIENCE_BELOW: f64 = 0.7;
const RECOMMEND_EDUCATION_BELOW: f64 = 0.6;
const RECOMMEND_PROFILE_BELOW: f64 = 0.6;

/// Everything the explainer reads about one match.
#[derive(Debug, Clone, Copy)]
pub struct MatchFacts<'a> {
    pub candidate_name: &'a str,
    pub job_title: &'a str,
    pub percentage: u32,
    pub breakdown: &'a MatchBreakdown,
    pub matched_skills: &'a [String],
    pub missing_skills: &'a [String],
    pub quality: QualityTier,
    pub min_experience_years: Option<f64>,
}

/// Structured explainer output.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub narrative: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn explain(facts: &MatchFacts<'_>) -> Explanation {
    Explanation {
        narrative: narrative(facts),
        strengths: strengths(facts.breakdown, facts.matched_skills),
        weaknesses: weaknesses(facts.breakdown, facts.missing_skills),
        recommendations: recommendations(
            facts.breakdown,
            facts.missing_skills,
            facts.min_experience_years,
        ),
    }
}

/// Substitutes `{key}` placeholders in a template in a single pass.
/// Inserted values are never rescanned, so braces in names or skills survive.
/// Unknown placeholders are kept verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match substitution {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// First `limit` skills joined with ", ", plus `more` when the list was cut.
fn listed(skills: &[String], limit: usize, more: &'static str) -> (String, &'static str) {
    let shown = skills
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let suffix = if skills.len() > limit { more } else { "" };
    (shown, suffix)
}

pub fn narrative(facts: &MatchFacts<'_>) -> String {
    let percentage = facts.percentage.to_string();
    let mut sentences = vec![fill(
        t::SUMMARY,
        &[
            ("name", facts.candidate_name),
            ("percentage", &percentage),
            ("title", facts.job_title),
        ],
    )];

    if !facts.matched_skills.is_empty() {
        let (skills, more) = listed(facts.matched_skills, MAX_LISTED_MATCHED, t::MATCHED_SKILLS_MORE);
        sentences.push(fill(t::MATCHED_SKILLS, &[("skills", &skills), ("more", more)]));
    }

    if !facts.missing_skills.is_empty() {
        let (skills, more) = listed(facts.missing_skills, MAX_LISTED_MISSING, t::MISSING_SKILLS_MORE);
        sentences.push(fill(t::MISSING_SKILLS, &[("skills", &skills), ("more", more)]));
    }

    let experience = facts.breakdown.experience_match;
    sentences.push(
        if experience >= EXPERIENCE_EXCEEDS_AT {
            t::EXPERIENCE_EXCEEDS
        } else if experience >= EXPERIENCE_MEETS_AT {
            t::EXPERIENCE_MEETS
        } else {
            t::EXPERIENCE_SHORT
        }
        .to_string(),
    );

    sentences.push(
        match facts.quality {
            QualityTier::Excellent => t::CLOSING_EXCELLENT,
            QualityTier::Good => t::CLOSING_GOOD,
            QualityTier::Medium => t::CLOSING_MEDIUM,
            QualityTier::Low => t::CLOSING_LOW,
        }
        .to_string(),
    );

    sentences.join(" ")
}

pub fn strengths(breakdown: &MatchBreakdown, matched_skills: &[String]) -> Vec<String> {
    let mut strengths = Vec::new();

    if breakdown.skills_match >= STRONG_SKILLS_AT {
        strengths.push(t::STRENGTH_SKILLS.to_string());
    }
    if breakdown.experience_match >= EXPERIENCE_EXCEEDS_AT {
        strengths.push(t::STRENGTH_EXPERIENCE.to_string());
    }
    if breakdown.semantic_match >= STRONG_SEMANTIC_AT {
        strengths.push(t::STRENGTH_SEMANTIC.to_string());
    }
    if matched_skills.len() > MANY_SKILLS_OVER {
        let count = matched_skills.len().to_string();
        strengths.push(fill(t::STRENGTH_SKILL_COUNT, &[("count", &count)]));
    }

    if strengths.is_empty() {
        strengths.push(t::STRENGTH_DEFAULT.to_string());
    }
    strengths
}

pub fn weaknesses(breakdown: &MatchBreakdown, missing_skills: &[String]) -> Vec<String> {
    let mut weaknesses = Vec::new();

    if breakdown.skills_match < WEAK_SKILLS_BELOW {
        weaknesses.push(t::WEAKNESS_SKILLS.to_string());
    }
    if breakdown.experience_match < EXPERIENCE_MEETS_AT {
        weaknesses.push(t::WEAKNESS_EXPERIENCE.to_string());
    }
    if missing_skills.len() > MANY_SKILLS_OVER {
        let count = missing_skills.len().to_string();
        weaknesses.push(fill(t::WEAKNESS_MISSING_COUNT, &[("count", &count)]));
    }
    if breakdown.education_match < WEAK_EDUCATION_BELOW {
        weaknesses.push(t::WEAKNESS_EDUCATION.to_string());
    }

    if weaknesses.is_empty() {
        weaknesses.push(t::WEAKNESS_DEFAULT.to_string());
    }
    weaknesses
}

pub fn recommendations(
    breakdown: &MatchBreakdown,
    missing_skills: &[String],
    min_experience_years: Option<f64>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_skills.is_empty() {
        let top = missing_skills
            .iter()
            .take(MAX_LISTED_MISSING)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(fill(t::RECOMMEND_SKILLS, &[("skills", &top)]));
    }

    if let Some(years) = min_experience_years.filter(|y| *y > 0.0) {
        if breakdown.experience_match < RECOMMEND_EXPERIENCE_BELOW {
            let years = format_years(years);
            recommendations.push(fill(t::RECOMMEND_EXPERIENCE, &[("years", &years)]));
        }
    }

    if breakdown.education_match < RECOMMEND_EDUCATION_BELOW {
        recommendations.push(t::RECOMMEND_EDUCATION.to_string());
    }

    if breakdown.semantic_match < RECOMMEND_PROFILE_BELOW {
        recommendations.push(t::RECOMMEND_PROFILE.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(t::RECOMMEND_DEFAULT.to_string());
    }
    recommendations
}

/// Per-category analysis lines keyed by "skills", "experience", "education", "semantic".
pub fn detailed_analysis(
    breakdown: &MatchBreakdown,
    matched_count: usize,
    missing_count: usize,
    candidate_years: f64,
    education_records: usize,
) -> BTreeMap<String, String> {
    let pct = |score: f64| format!("{:.0}", score * 100.0);

    BTreeMap::from([
        (
            "skills".to_string(),
            fill(
                t::ANALYSIS_SKILLS,
                &[
                    ("pct", &pct(breakdown.skills_match)),
                    ("matched", &matched_count.to_string()),
                    ("missing", &missing_count.to_string()),
                ],
            ),
        ),
        (
            "experience".to_string(),
            fill(
                t::ANALYSIS_EXPERIENCE,
                &[
                    ("pct", &pct(breakdown.experience_match)),
                    ("years", &format_years(candidate_years)),
                ],
            ),
        ),
        (
            "education".to_string(),
            fill(
                t::ANALYSIS_EDUCATION,
                &[
                    ("pct", &pct(breakdown.education_match)),
                    ("records", &education_records.to_string()),
                ],
            ),
        ),
        (
            "semantic".to_string(),
            fill(t::ANALYSIS_SEMANTIC, &[("pct", &pct(breakdown.semantic_match))]),
        ),
    ])
}

pub fn decision(quality: QualityTier) -> &'static str {
    match quality {
        QualityTier::Excellent => t::DECISION_EXCELLENT,
        QualityTier::Good => t::DECISION_GOOD,
        QualityTier::Medium => t::DECISION_MEDIUM,
        QualityTier::Low => t::DECISION_LOW,
    }
}

/// "5" for whole years, "2.5" otherwise.
fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        years.to_string()
    }
}
