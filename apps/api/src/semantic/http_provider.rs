/// HTTP embedding client for a text-embeddings-inference style server.
///
/// Contract: `POST {base_url}/embed` with `{"inputs": [...]}` returns one
/// vector per input, in input order.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::{ModelInfo, ProviderError, SemanticSimilarityProvider};

const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
}

#[derive(Clone)]
pub struct HttpEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    backoff_base: Duration,
}

impl HttpEmbeddingProvider {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/embed", base_url.trim_end_matches('/')),
            model,
            backoff_base: BACKOFF_BASE,
        })
    }

    /// Retries on 429 and 5xx with exponential backoff.
    async fn call(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let request_body = EmbedRequest { inputs: texts };
        let mut last_error: Option<ProviderError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(self.backoff_base, attempt);
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .json(&request_body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ProviderError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding backend returned {}: {}", status, body);
                last_error = Some(ProviderError::Backend {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::Backend {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let vectors = parse_embeddings(&body, texts.len())?;

            debug!(
                "Embedding call succeeded: inputs={}, dimension={}",
                texts.len(),
                vectors.first().map(Vec::len).unwrap_or(0)
            );

            return Ok(vectors);
        }

        Err(last_error.unwrap_or(ProviderError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Delay before retry `attempt` (1-based): base, 2×base, 4×base...
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * (1 << attempt.saturating_sub(1))
}

#[async_trait]
impl SemanticSimilarityProvider for HttpEmbeddingProvider {
    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: self.model.clone(),
            backend: "http".to_string(),
            dimension: None,
        }
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.call(texts).await
    }
}

/// Parses `[[f32]]`, checking one vector per input and a uniform dimension.
fn parse_embeddings(body: &str, expected: usize) -> Result<Vec<Vec<f32>>, ProviderError> {
    let vectors: Vec<Vec<f32>> =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    if vectors.len() != expected {
        return Err(ProviderError::CountMismatch {
            expected,
            got: vectors.len(),
        });
    }

    if let Some(first) = vectors.first() {
        let dimension = first.len();
        if vectors.iter().any(|v| v.len() != dimension) {
            return Err(ProviderError::Malformed(
                "vectors have inconsistent dimensions".to_string(),
            ));
        }
    }

    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, routing::post, Router};

    use super::*;

    /// Canned responses served in order; the last one repeats.
    #[derive(Clone)]
    struct Script {
        calls: Arc<AtomicUsize>,
        responses: Arc<Vec<(StatusCode, &'static str)>>,
    }

    async fn scripted(State(script): State<Script>) -> (StatusCode, &'static str) {
        let n = script.calls.fetch_add(1, Ordering::SeqCst);
        script.responses[n.min(script.responses.len() - 1)]
    }

    /// Starts an embedding server stub and returns a provider pointed at it
    /// together with the request counter.
    async fn provider_against(
        responses: Vec<(StatusCode, &'static str)>,
    ) -> (HttpEmbeddingProvider, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let script = Script {
            calls: calls.clone(),
            responses: Arc::new(responses),
        };
        let app = Router::new()
            .route("/embed", post(scripted))
            .with_state(script);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut provider = HttpEmbeddingProvider::new(
            &format!("http://{addr}"),
            "stub".to_string(),
            Duration::from_secs(10),
        )
        .unwrap();
        provider.backoff_base = Duration::from_millis(10);
        (provider, calls)
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_backoff_doubles_from_one_second() {
        assert_eq!(backoff_delay(BACKOFF_BASE, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(BACKOFF_BASE, 2), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let (provider, calls) = provider_against(vec![
            (StatusCode::SERVICE_UNAVAILABLE, "warming up"),
            (StatusCode::SERVICE_UNAVAILABLE, "warming up"),
            (StatusCode::OK, "[[0.6, 0.8]]"),
        ])
        .await;

        let vectors = provider.encode_batch(&texts(&["rust"])).await.unwrap();
        assert_eq!(vectors, vec![vec![0.6, 0.8]]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_retries() {
        let (provider, calls) =
            provider_against(vec![(StatusCode::TOO_MANY_REQUESTS, "slow down")]).await;

        let err = provider.encode_batch(&texts(&["rust"])).await.unwrap_err();
        assert!(matches!(err, ProviderError::Backend { status: 429, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (provider, calls) =
            provider_against(vec![(StatusCode::BAD_REQUEST, "inputs too long")]).await;

        let err = provider.encode_batch(&texts(&["rust"])).await.unwrap_err();
        match err {
            ProviderError::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "inputs too long");
            }
            other => panic!("Expected backend error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let (provider, calls) = provider_against(vec![(StatusCode::OK, "{}")]).await;

        let err = provider.encode_batch(&texts(&["rust"])).await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_embeddings_ok() {
        let vectors = parse_embeddings("[[0.1, 0.2], [0.3, 0.4]]", 2).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.3, 0.4]);
    }

    #[test]
    fn test_parse_embeddings_count_mismatch() {
        let err = parse_embeddings("[[0.1, 0.2]]", 2).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::CountMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_parse_embeddings_ragged_rejected() {
        let err = parse_embeddings("[[0.1, 0.2], [0.3]]", 2).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_parse_embeddings_garbage_rejected() {
        let err = parse_embeddings(r#"{"error": "model loading"}"#, 1).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = HttpEmbeddingProvider::new(
            "http://localhost:8080/",
            "all-MiniLM-L6-v2".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8080/embed");
        assert_eq!(provider.model_info().backend, "http");
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let provider = HttpEmbeddingProvider::new(
            "http://127.0.0.1:1",
            "unused".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(provider.encode_batch(&[]).await.unwrap().is_empty());
    }
}
