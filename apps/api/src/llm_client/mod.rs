/// LLM Client: the single point of entry for all completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenRouter API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: mistralai/mistral-7b-instruct:free (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for every completion call.
pub const MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const MAX_TOKENS: u32 = 2000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const APP_TITLE: &str = "Upwork Proposal Generator";

/// Classified completion failure. The variant decides the `type` reported to callers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider answered with a non-success status.
    #[error("API Error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The request went out but no response came back (connect failure, timeout).
    #[error("No response from API. Please check your API key and network connection.")]
    Network(String),

    /// The call could not be built or its result could not be processed locally.
    #[error("{0}")]
    Request(String),
}

impl LlmError {
    /// Wire label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Upstream { .. } => "api_error",
            LlmError::Network(_) => "network_error",
            LlmError::Request(_) => "request_error",
        }
    }

    /// Underlying cause, for logs. Not part of the client-facing message.
    pub fn cause(&self) -> &str {
        match self {
            LlmError::Upstream { message, .. } => message,
            LlmError::Network(cause) | LlmError::Request(cause) => cause,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Network(_) => true,
            LlmError::Upstream { status, .. } => *status == 429 || *status >= 500,
            LlmError::Request(_) => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() || e.is_decode() {
            LlmError::Request(e.to_string())
        } else {
            LlmError::Network(e.to_string())
        }
    }
}

/// One system + user exchange with its sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: &'static str,
    pub user: String,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The completion seam. `AppState` carries an `Arc<dyn CompletionClient>` so the
/// orchestrator can be exercised without the network.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the first choice's message text unmodified.
    async fn complete(&self, api_key: &str, prompt: &ChatPrompt) -> Result<String, LlmError>;
}

/// Bounded retry with exponential backoff. `max_retries = 0` disables retrying.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        // 1x, 2x, 4x ... base delay
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// OpenRouter chat-completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    referer: String,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(endpoint: String, referer: String, retry: RetryPolicy) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            referer,
            retry,
        })
    }

    async fn send_once(&self, api_key: &str, body: &ChatRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Request("Completion response contained no message".to_string()))
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, api_key: &str, prompt: &ChatPrompt) -> Result<String, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Request("Missing API credential".to_string()));
        }

        let body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: prompt.temperature,
        };

        let mut attempt = 0;
        loop {
            match self.send_once(api_key, &body).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry.max_retries && e.is_retryable() => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "Completion attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Prefers the provider's `error.message`, then the status reason, then the raw body.
fn upstream_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "You are an expert freelancer.",
            user: "Write three proposals.".to_string(),
            temperature: 0.8,
        }
    }

    fn client_for(server: &MockServer, retry: RetryPolicy) -> LlmClient {
        LlmClient::new(
            format!("{}/api/v1/chat/completions", server.uri()),
            "http://localhost:3000".to_string(),
            retry,
        )
        .unwrap()
    }

    fn completion_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 300 }
        })
    }

    #[tokio::test]
    async fn test_complete_sends_expected_request_and_returns_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(bearer_token("sk-or-test"))
            .and(header("HTTP-Referer", "http://localhost:3000"))
            .and(header("X-Title", "Upwork Proposal Generator"))
            .and(body_partial_json(serde_json::json!({
                "model": MODEL,
                "max_tokens": 2000,
                "messages": [
                    { "role": "system", "content": "You are an expert freelancer." },
                    { "role": "user", "content": "Write three proposals." }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("  PROPOSAL 1:\nHi  ")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RetryPolicy::new(0));
        let text = client.complete("sk-or-test", &prompt()).await.unwrap();

        // Returned unmodified, no trimming
        assert_eq!(text, "  PROPOSAL 1:\nHi  ");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error_with_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "No auth credentials found", "code": 401 }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, RetryPolicy::new(0))
            .complete("sk-or-bad", &prompt())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "api_error");
        assert_eq!(err.to_string(), "API Error (401): No auth credentials found");
    }

    #[tokio::test]
    async fn test_upstream_error_without_json_body_uses_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, RetryPolicy::new(0))
            .complete("sk-or-test", &prompt())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API Error (503): Service Unavailable");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        // Nothing listens on port 9 on loopback
        let client = LlmClient::new(
            "http://127.0.0.1:9/api/v1/chat/completions".to_string(),
            "http://localhost:3000".to_string(),
            RetryPolicy::new(0),
        )
        .unwrap();

        let err = client.complete("sk-or-test", &prompt()).await.unwrap_err();
        assert_eq!(err.kind(), "network_error");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, RetryPolicy::new(0))
            .complete("sk-or-test", &prompt())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "request_error");
    }

    #[tokio::test]
    async fn test_blank_credential_is_request_error_without_network_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("x")))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, RetryPolicy::new(0))
            .complete("  ", &prompt())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "request_error");
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, RetryPolicy::new(0))
            .complete("sk-or-test", &prompt())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "api_error");
    }

    #[tokio::test]
    async fn test_retry_policy_retries_server_errors_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(5),
        };
        let text = client_for(&server, retry)
            .complete("sk-or-test", &prompt())
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(5),
        };
        let err = client_for(&server, retry)
            .complete("sk-or-test", &prompt())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API Error (400): Bad Request");
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let retry = RetryPolicy::new(3);
        assert_eq!(retry.delay_for(1), Duration::from_secs(1));
        assert_eq!(retry.delay_for(2), Duration::from_secs(2));
        assert_eq!(retry.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            LlmError::Upstream {
                status: 429,
                message: "slow down".to_string()
            }
            .kind(),
            "api_error"
        );
        assert_eq!(LlmError::Network("timeout".to_string()).kind(), "network_error");
        assert_eq!(LlmError::Request("bad".to_string()).kind(), "request_error");
    }
}
