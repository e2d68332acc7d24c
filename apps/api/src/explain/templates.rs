// All user-facing phrasing for match explanations.
// Placeholders in `{braces}` are substituted by `explain::fill`.

/// Opening sentence. Replace `{name}`, `{percentage}`, `{title}`.
pub const SUMMARY: &str = "{name} has a {percentage}% compatibility with the {title} position.";

/// Replace `{skills}` and `{more}`.
pub const MATCHED_SKILLS: &str = "Matching skills: {skills}{more}.";
pub const MATCHED_SKILLS_MORE: &str = " and more";

/// Replace `{skills}` and `{more}`.
pub const MISSING_SKILLS: &str = "Skills to develop: {skills}{more}.";
pub const MISSING_SKILLS_MORE: &str = " and others";

pub const EXPERIENCE_EXCEEDS: &str = "The candidate's experience exceeds the requirements.";
pub const EXPERIENCE_MEETS: &str = "The candidate's experience meets the requirements.";
pub const EXPERIENCE_SHORT: &str = "The candidate needs more experience for this position.";

pub const CLOSING_EXCELLENT: &str = "Highly recommended for interview.";
pub const CLOSING_GOOD: &str = "Recommended for consideration.";
pub const CLOSING_MEDIUM: &str = "Candidate with potential; requires further evaluation.";
pub const CLOSING_LOW: &str = "Candidate does not meet the minimum requirements.";

// Strengths
pub const STRENGTH_SKILLS: &str = "Excellent technical skills match";
pub const STRENGTH_EXPERIENCE: &str = "Experience above the requirements";
pub const STRENGTH_SEMANTIC: &str = "Strong alignment with the job description";
/// Replace `{count}`.
pub const STRENGTH_SKILL_COUNT: &str = "Masters {count} relevant skills";
pub const STRENGTH_DEFAULT: &str = "Basic profile suitable for evaluation";

// Weaknesses
pub const WEAKNESS_SKILLS: &str = "Lacks key technical skills";
pub const WEAKNESS_EXPERIENCE: &str = "Experience below the requirements";
/// Replace `{count}`.
pub const WEAKNESS_MISSING_COUNT: &str = "Missing {count} required skills";
pub const WEAKNESS_EDUCATION: &str = "Academic background not aligned with the requirements";
pub const WEAKNESS_DEFAULT: &str = "No significant weaknesses identified";

// Recommendations
/// Replace `{skills}`.
pub const RECOMMEND_SKILLS: &str = "Develop skills in: {skills}";
/// Replace `{years}`.
pub const RECOMMEND_EXPERIENCE: &str = "Gain more relevant experience (ideal: {years} years)";
pub const RECOMMEND_EDUCATION: &str =
    "Consider certifications or additional training related to the position";
pub const RECOMMEND_PROFILE: &str =
    "Update the professional profile to highlight experience relevant to the position";
pub const RECOMMEND_DEFAULT: &str = "Very complete profile; keep it up to date";

// Detailed analysis. Replace `{pct}` plus the listed fields.
/// Also `{matched}`, `{missing}`.
pub const ANALYSIS_SKILLS: &str =
    "Skills match: {pct}%. Matching skills: {matched}. Missing skills: {missing}.";
/// Also `{years}`.
pub const ANALYSIS_EXPERIENCE: &str =
    "Experience match: {pct}%. The candidate has {years} years of experience.";
/// Also `{records}`.
pub const ANALYSIS_EDUCATION: &str = "Education match: {pct}%. Education records: {records}.";
pub const ANALYSIS_SEMANTIC: &str =
    "Semantic similarity: {pct}%. Compatibility between the candidate profile and the job description.";

// Hiring decision
pub const DECISION_EXCELLENT: &str = "STRONGLY RECOMMENDED - Schedule a high-priority interview";
pub const DECISION_GOOD: &str = "RECOMMENDED - Schedule an interview";
pub const DECISION_MEDIUM: &str = "CONSIDER - Additional evaluation recommended";
pub const DECISION_LOW: &str = "NOT RECOMMENDED - Does not meet minimum requirements";
