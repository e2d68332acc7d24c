use serde::{Deserialize, Deserializer, Serialize};

/// A single education record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

/// A single work-experience entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    /// None for the current position.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// Normalized skill tokens, first-occurrence order, no duplicates.
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub languages: Vec<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Default)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Normalized required-skill tokens. Empty means any candidate satisfies the skills bar.
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub location: Option<String>,
    pub job_type: JobType,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub min_experience_years: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire formats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CandidateWire {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "skill_tokens")]
    skills: Vec<String>,
    #[serde(default)]
    experience_years: f64,
    #[serde(default)]
    experience: Vec<Experience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CandidateWire::deserialize(deserializer)?;
        if !wire.experience_years.is_finite() || wire.experience_years < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "experience_years must be a non-negative number, got {}",
                wire.experience_years
            )));
        }
        Ok(Candidate {
            id: wire.id,
            name: wire.name,
            skills: wire.skills,
            experience_years: wire.experience_years,
            experience: wire.experience,
            education: wire.education,
            languages: wire.languages,
            summary: wire.summary,
            location: wire.location,
        })
    }
}

#[derive(Deserialize)]
struct JobWire {
    id: String,
    title: String,
    description: String,
    #[serde(default, deserialize_with = "skill_tokens")]
    skills: Vec<String>,
    #[serde(default)]
    requirements: Vec<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default, rename = "type")]
    job_type: JobType,
    #[serde(default)]
    salary_min: Option<u64>,
    #[serde(default)]
    salary_max: Option<u64>,
    #[serde(default)]
    min_experience_years: Option<f64>,
}

impl<'de> Deserialize<'de> for Job {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = JobWire::deserialize(deserializer)?;
        if let Some(years) = wire.min_experience_years {
            if !years.is_finite() || years < 0.0 {
                return Err(serde::de::Error::custom(format!(
                    "min_experience_years must be a non-negative number, got {years}"
                )));
            }
        }
        Ok(Job {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            skills: wire.skills,
            requirements: wire.requirements,
            location: wire.location,
            job_type: wire.job_type,
            salary_min: wire.salary_min,
            salary_max: wire.salary_max,
            min_experience_years: wire.min_experience_years,
        })
    }
}

fn skill_tokens<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(normalize_skills(raw))
}

/// Trims and lower-cases skill tokens, dropping empties and later duplicates.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for skill in skills {
        let token = skill.as_ref().trim().to_lowercase();
        if !token.is_empty() && !normalized.contains(&token) {
            normalized.push(token);
        }
    }
    normalized
}
