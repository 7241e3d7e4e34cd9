//! Inference endpoint client
//!
//! HTTP client for the managed inference runtime hosting the phishing model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{parse_score, ScoringClient, ScoringError, CSV_CONTENT_TYPE};

/// Scoring client for `POST {base}/endpoints/{name}/invocations`
///
/// One request per score. The request timeout is the only latency bound;
/// failed requests are never retried.
pub struct HttpScoringClient {
    invocation_url: String,
    endpoint_name: String,
    http_client: reqwest::Client,
}

impl HttpScoringClient {
    /// Create new scoring client
    pub fn new(base_url: &str, endpoint_name: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            invocation_url: format!(
                "{}/endpoints/{}/invocations",
                base_url.trim_end_matches('/'),
                endpoint_name
            ),
            endpoint_name: endpoint_name.to_string(),
            http_client,
        })
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn score(&self, payload: &str) -> Result<f64, ScoringError> {
        let response = self.http_client
            .post(&self.invocation_url)
            .header(CONTENT_TYPE, CSV_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScoringError::Unavailable(format!("{} timed out", self.endpoint_name))
                } else {
                    ScoringError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Endpoint {} returned {}: {}", self.endpoint_name, status, error_text);
            return Err(ScoringError::Unavailable(format!(
                "{} returned {}",
                self.endpoint_name,
                status.as_u16()
            )));
        }

        let body = response.bytes().await
            .map_err(|e| ScoringError::Unavailable(e.to_string()))?;

        parse_score(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use tokio_test::assert_err;

    /// Serve `router` on an ephemeral port, returning its base URL
    async fn spawn_runtime(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: &str, timeout: Duration) -> HttpScoringClient {
        HttpScoringClient::new(base_url, "phishing-detector-endpoint", timeout).unwrap()
    }

    #[tokio::test]
    async fn test_score_posts_csv_to_named_endpoint() {
        let router = Router::new().route(
            "/endpoints/:name/invocations",
            post(|Path(name): Path<String>, headers: HeaderMap, body: String| async move {
                let is_csv = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    == Some(CSV_CONTENT_TYPE);

                if name == "phishing-detector-endpoint" && is_csv && body == "24,2,0,0,0,1" {
                    (StatusCode::OK, "0.87")
                } else {
                    (StatusCode::BAD_REQUEST, "unexpected request")
                }
            }),
        );
        let base = spawn_runtime(router).await;

        let score = client(&format!("{}/", base), Duration::from_secs(5))
            .score("24,2,0,0,0,1")
            .await
            .unwrap();

        assert_eq!(score, 0.87);
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let router = Router::new().route(
            "/endpoints/:name/invocations",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let base = spawn_runtime(router).await;

        let err = client(&base, Duration::from_secs(5)).score("0,0,0,0,0,0").await.unwrap_err();
        assert!(matches!(err, ScoringError::Unavailable(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route(
            "/endpoints/:name/invocations",
            post(|| async { r#"{"predictions": [0.87]}"# }),
        );
        let base = spawn_runtime(router).await;

        let err = client(&base, Duration::from_secs(5)).score("0,0,0,0,0,0").await.unwrap_err();
        assert!(matches!(err, ScoringError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let router = Router::new().route(
            "/endpoints/:name/invocations",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "0.1"
            }),
        );
        let base = spawn_runtime(router).await;

        let err = client(&base, Duration::from_millis(100)).score("0,0,0,0,0,0").await.unwrap_err();
        assert!(matches!(err, ScoringError::Unavailable(ref msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(&format!("http://{}", addr), Duration::from_secs(1))
            .score("0,0,0,0,0,0")
            .await;
        assert_err!(&result);
        assert!(matches!(result, Err(ScoringError::Unavailable(_))));
    }
}
