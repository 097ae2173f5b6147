use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::generate::{ChatRequest, ChatResponse, CompletionService};
use crate::{Error, Result};

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Client for an OpenAI-compatible chat-completion endpoint (Groq by default).
///
/// One request per call: no retries, no streaming.
#[derive(Clone)]
pub struct GroqClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GroqClient {
    /// Create a client for the base URL and API key in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Generation(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint_url(config.base_url()),
            api_key: config.api_key().to_string(),
        })
    }

    /// The URL requests are POSTed to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionService for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        debug!(endpoint = %self.endpoint, model = %request.model, "POST chat completion");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("completion service unreachable: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Generation(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(Error::Generation(format!(
                "completion service returned {status}: {message}"
            )));
        }

        serde_json::from_slice(&body)
            .map_err(|e| Error::Generation(format!("malformed completion response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn endpoint_url(base: &Url) -> Url {
    let base_path = base.path().trim_end_matches('/');
    let mut url = base.clone();
    url.set_path(&format!("{base_path}/{CHAT_COMPLETIONS_PATH}"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::ChatMessage;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const TEST_KEY: &str = "gsk_test";

    async fn spawn_test_server() -> anyhow::Result<(String, JoinHandle<anyhow::Result<()>>)> {
        let app = Router::new()
            .route("/openai/v1/chat/completions", post(test_completion))
            .route("/broken/v1/chat/completions", post(test_malformed));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await?;
            Ok(())
        });
        Ok((format!("http://{addr}"), server))
    }

    async fn test_completion(
        headers: HeaderMap,
        Json(req): Json<ChatRequest>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TEST_KEY}"));
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
                })),
            );
        }

        let echo = req
            .messages
            .last()
            .map(|m| format!("{}:{}", req.model, m.content))
            .unwrap_or_default();
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": echo}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
            })),
        )
    }

    async fn test_malformed() -> &'static str {
        "not json"
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("สวัสดี")],
        }
    }

    fn client(base_url: &str, key: &str) -> GroqClient {
        let config = Config::new(key).unwrap().with_base_url(base_url).unwrap();
        GroqClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        let config = Config::new("k").unwrap();
        let client = GroqClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );

        let base = Url::parse("http://localhost:8080/v1/?x=1").unwrap();
        assert_eq!(
            endpoint_url(&base).as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_completion_round_trip() -> anyhow::Result<()> {
        let (base_url, _server) = spawn_test_server().await?;
        let client = client(&format!("{base_url}/openai/v1"), TEST_KEY);

        let answer = client.complete(&request()).await?.into_first_content()?;
        assert_eq!(answer, "llama-3.1-8b-instant:สวัสดี");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_key_is_generation_error() -> anyhow::Result<()> {
        let (base_url, _server) = spawn_test_server().await?;
        let client = client(&format!("{base_url}/openai/v1"), "wrong");

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        let message = err.to_string();
        assert!(message.contains("401"), "{message}");
        assert!(message.contains("Invalid API Key"), "{message}");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_generation_error() -> anyhow::Result<()> {
        let (base_url, _server) = spawn_test_server().await?;
        let client = client(&format!("{base_url}/broken/v1"), TEST_KEY);

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("malformed"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_service() -> anyhow::Result<()> {
        // bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client = client(&format!("http://{addr}/v1"), TEST_KEY);
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("unreachable"));
        Ok(())
    }
}
