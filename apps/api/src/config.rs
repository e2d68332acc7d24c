use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

/// Allowed drift between the weight sum and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

const DEFAULT_EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "degree",
    "licenciatura",
    "maestría",
    "doctorado",
    "título",
];

const DEFAULT_REMOTE_KEYWORDS: &[&str] = &["remote", "remoto", "anywhere", "cualquier lugar"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Matching weights must sum to 1.0 (±0.01), got {0:.4}")]
    WeightSum(f64),

    #[error("Weight '{name}' must be within [0, 1], got {value}")]
    WeightRange { name: &'static str, value: f64 },

    #[error("Thresholds must be ordered min <= good <= excellent within [0, 1], got {min} / {good} / {excellent}")]
    ThresholdOrder { min: f64, good: f64, excellent: f64 },
}

/// Aggregator weights for the four primary sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub semantic: f64,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.25,
            education: 0.10,
            semantic: 0.25,
        }
    }
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.semantic
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
            ("semantic", self.semantic),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightRange { name, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// Score floors for the quality tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityThresholds {
    pub min: f64,
    pub good: f64,
    pub excellent: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min: 0.30,
            good: 0.60,
            excellent: 0.80,
        }
    }
}

impl QualityThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = 0.0 <= self.min
            && self.min <= self.good
            && self.good <= self.excellent
            && self.excellent <= 1.0;
        if !ordered {
            return Err(ConfigError::ThresholdOrder {
                min: self.min,
                good: self.good,
                excellent: self.excellent,
            });
        }
        Ok(())
    }
}

/// Keyword vocabularies consulted by the education and location matchers.
/// Stored lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSets {
    pub education: Vec<String>,
    pub remote: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            education: DEFAULT_EDUCATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            remote: DEFAULT_REMOTE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Everything the matching engine reads at runtime. Immutable after startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchingConfig {
    pub weights: MatchingWeights,
    pub thresholds: QualityThresholds,
    pub keywords: KeywordSets,
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.thresholds.validate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingBackend {
    Hash,
    Http { url: String },
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub model: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is unparsable or the matching config is invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    pub max_batch_size: usize,
    pub embedding: EmbeddingConfig,
    pub matching: MatchingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchingConfig::default();
        let matching = MatchingConfig {
            weights: MatchingWeights {
                skills: parse_env("SKILLS_WEIGHT", defaults.weights.skills)?,
                experience: parse_env("EXPERIENCE_WEIGHT", defaults.weights.experience)?,
                education: parse_env("EDUCATION_WEIGHT", defaults.weights.education)?,
                semantic: parse_env("SEMANTIC_WEIGHT", defaults.weights.semantic)?,
            },
            thresholds: QualityThresholds {
                min: parse_env("MIN_MATCH_THRESHOLD", defaults.thresholds.min)?,
                good: parse_env("GOOD_MATCH_THRESHOLD", defaults.thresholds.good)?,
                excellent: parse_env("EXCELLENT_MATCH_THRESHOLD", defaults.thresholds.excellent)?,
            },
            keywords: KeywordSets {
                education: list_env("EDUCATION_KEYWORDS").unwrap_or(defaults.keywords.education),
                remote: list_env("REMOTE_KEYWORDS").unwrap_or(defaults.keywords.remote),
            },
        };
        matching
            .validate()
            .context("Invalid matching configuration")?;

        let backend = match std::env::var("EMBEDDING_BACKEND")
            .unwrap_or_else(|_| "hash".to_string())
            .as_str()
        {
            "hash" => EmbeddingBackend::Hash,
            "http" => EmbeddingBackend::Http {
                url: require_env("EMBEDDING_URL")?,
            },
            other => anyhow::bail!("EMBEDDING_BACKEND must be 'hash' or 'http', got '{other}'"),
        };

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_origins: list_env("CORS_ORIGINS").unwrap_or_default(),
            max_batch_size: parse_env("MAX_BATCH_SIZE", 100)?,
            embedding: EmbeddingConfig {
                backend,
                model: std::env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
                dimension: parse_env("EMBEDDING_DIMENSION", 384)?,
                timeout_secs: parse_env("EMBEDDING_TIMEOUT_SECS", 30)?,
            },
            matching,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list, lower-cased. `None` when unset or blank.
fn list_env(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let items = split_list(&raw);
    (!items.is_empty()).then_some(items)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((MatchingWeights::default().sum() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weights_within_tolerance_accepted() {
        let weights = MatchingWeights {
            skills: 0.405,
            ..MatchingWeights::default()
        };
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_outside_tolerance_rejected() {
        let weights = MatchingWeights {
            skills: 0.5,
            ..MatchingWeights::default()
        };
        match weights.validate() {
            Err(ConfigError::WeightSum(sum)) => assert!((sum - 1.1).abs() < 1e-9),
            other => panic!("Expected WeightSum error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = MatchingWeights {
            skills: -0.1,
            experience: 0.5,
            education: 0.3,
            semantic: 0.3,
        };
        assert!(matches!(
            weights.validate(),
            Err(ConfigError::WeightRange { name: "skills", .. })
        ));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let thresholds = QualityThresholds {
            min: 0.7,
            good: 0.6,
            excellent: 0.8,
        };
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_default_keyword_sets_are_lowercase() {
        let keywords = KeywordSets::default();
        assert!(keywords.education.contains(&"phd".to_string()));
        assert!(keywords.remote.contains(&"cualquier lugar".to_string()));
        assert!(keywords
            .education
            .iter()
            .chain(keywords.remote.iter())
            .all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" Remote , ,Home Office "),
            vec!["remote".to_string(), "home office".to_string()]
        );
    }
}
