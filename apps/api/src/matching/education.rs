use tracing::debug;

use crate::config::KeywordSets;
use crate::models::{Candidate, Education, Job};
use crate::semantic::{ProviderError, SemanticSimilarityProvider};

/// Neither side gave us anything to compare.
pub const NEUTRAL_SCORE: f64 = 0.5;
/// A requirement exists but the candidate's records carry no usable text.
pub const UNSUPPORTED_SCORE: f64 = 0.3;

/// Scores whether the candidate's education clears the bar implied by the
/// job's requirement strings.
pub async fn score_education(
    candidate: &Candidate,
    job: &Job,
    keywords: &KeywordSets,
    provider: &dyn SemanticSimilarityProvider,
) -> Result<f64, ProviderError> {
    if candidate.education.is_empty() || job.requirements.is_empty() {
        return Ok(NEUTRAL_SCORE);
    }

    let requirements_text = job.requirements.join(" ").to_lowercase();
    if !mentions_education(&requirements_text, &keywords.education) {
        return Ok(1.0);
    }

    let education_text = describe_education(&candidate.education);
    if education_text.is_empty() {
        return Ok(UNSUPPORTED_SCORE);
    }

    let score = provider
        .similarity(&education_text, &requirements_text)
        .await?;
    debug!("Education similarity for {}: {:.3}", candidate.id, score);

    Ok(score.clamp(0.0, 1.0))
}

/// Case-insensitive keyword scan. `text` must already be lower-cased.
pub fn mentions_education(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// "{degree} in {field} from {institution}" per record, joined with ". ".
/// Records with no degree and no institution are skipped.
pub fn describe_education(records: &[Education]) -> String {
    records
        .iter()
        .filter_map(|edu| {
            let degree = edu.degree.trim();
            let institution = edu.institution.trim();
            if degree.is_empty() && institution.is_empty() {
                return None;
            }
            let field = edu
                .field
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty());
            let text = match field {
                Some(field) => format!("{degree} in {field} from {institution}"),
                None => format!("{degree} from {institution}"),
            };
            Some(text.trim().to_string())
        })
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::testing::{FailingProvider, StubProvider};

    fn bsc() -> Education {
        Education {
            degree: "BSc".to_string(),
            institution: "UNAM".to_string(),
            field: Some("Computer Science".to_string()),
            ..Default::default()
        }
    }

    fn candidate(education: Vec<Education>) -> Candidate {
        Candidate {
            id: "c-1".to_string(),
            name: "Ana".to_string(),
            education,
            ..Default::default()
        }
    }

    fn job(requirements: &[&str]) -> Job {
        Job {
            id: "j-1".to_string(),
            title: "Engineer".to_string(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_education_is_neutral() {
        let provider = StubProvider::new(0.9);
        let score = score_education(
            &candidate(vec![]),
            &job(&["Bachelor degree required"]),
            &KeywordSets::default(),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(score, NEUTRAL_SCORE);
    }

    #[tokio::test]
    async fn test_missing_requirements_is_neutral() {
        let provider = StubProvider::new(0.9);
        let score = score_education(&candidate(vec![bsc()]), &job(&[]), &KeywordSets::default(), &provider)
            .await
            .unwrap();
        assert_eq!(score, NEUTRAL_SCORE);
    }

    #[tokio::test]
    async fn test_no_education_keyword_is_full_score() {
        let provider = StubProvider::new(0.0);
        let score = score_education(
            &candidate(vec![bsc()]),
            &job(&["5 years of experience", "Intermediate English"]),
            &KeywordSets::default(),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(score, 1.0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_spanish_keyword_triggers_semantic_scoring() {
        let provider = StubProvider::new(0.0).with_pair(
            "BSc in Computer Science from UNAM",
            "título universitario en informática",
            0.64,
        );
        let score = score_education(
            &candidate(vec![bsc()]),
            &job(&["Título universitario en informática"]),
            &KeywordSets::default(),
            &provider,
        )
        .await
        .unwrap();
        assert!((score - 0.64).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_blank_records_are_penalized() {
        let provider = StubProvider::new(0.9);
        let blank = Education::default();
        let score = score_education(
            &candidate(vec![blank]),
            &job(&["Master degree preferred"]),
            &KeywordSets::default(),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(score, UNSUPPORTED_SCORE);
    }

    #[tokio::test]
    async fn test_custom_keyword_set_is_honoured() {
        let provider = StubProvider::new(0.0);
        let keywords = KeywordSets {
            education: vec!["diplom".to_string()],
            ..KeywordSets::default()
        };
        let score = score_education(
            &candidate(vec![bsc()]),
            &job(&["Bachelor degree"]),
            &keywords,
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(score, 1.0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let result = score_education(
            &candidate(vec![bsc()]),
            &job(&["PhD required"]),
            &KeywordSets::default(),
            &FailingProvider,
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_describe_education_without_field() {
        let records = vec![
            Education {
                degree: "MBA".to_string(),
                institution: "IE".to_string(),
                ..Default::default()
            },
            bsc(),
        ];
        assert_eq!(
            describe_education(&records),
            "MBA from IE. BSc in Computer Science from UNAM"
        );
    }
}
