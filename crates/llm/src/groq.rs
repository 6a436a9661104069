//! Groq provider implementation.
//!
//! One [`pipeline::CompletionRequest`] becomes one non-streaming POST to the
//! chat-completions endpoint, authenticated with the caller's credential. The
//! adapter never retries; classification of a failed call into
//! [`LlmError::Auth`] vs [`LlmError::Transport`] is the only policy here.

use async_trait::async_trait;
use pipeline::{
    ApiKey, Completion, CompletionRequest, LlmError, LlmProvider, TokenCount, TokenUsage,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Groq OpenAI-compatible API base URL.
const API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "qwen-2.5-32b";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

/// Error body shape: `{"error": {"message": "...", "type": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Groq chat-completions provider.
pub struct GroqProvider {
    client: Client,
    base_url: String,
}

impl GroqProvider {
    /// Creates a provider pointed at the public Groq endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Points the provider at a different endpoint (proxy or test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the wire request for one completion call.
    ///
    /// The whole stage prompt travels as a single user message.
    fn build_request(request: &CompletionRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: request.model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Maps a non-success HTTP status to the domain error taxonomy.
    ///
    /// 401/403 mean the credential was rejected; everything else — including
    /// rate limiting — is a transport failure.
    fn classify_status(status: StatusCode, message: String) -> LlmError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::auth(message),
            _ => LlmError::transport(format!("HTTP {status}: {message}")),
        }
    }

    /// Pulls the completion text and usage out of a parsed response.
    fn extract_completion(response: ChatResponse) -> Result<Completion, LlmError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::transport("response contained no choices"))?;
        let usage = response.usage.map(|u| {
            TokenUsage::new(
                TokenCount::new(u.prompt_tokens),
                TokenCount::new(u.completion_tokens),
            )
        });
        Ok(Completion {
            text: choice.message.content,
            usage,
        })
    }
}

impl Default for GroqProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    async fn complete(
        &self,
        key: &ApiKey,
        request: CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let body = Self::build_request(&request);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Prefer the service's own message over the raw body.
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(Self::classify_status(status, message));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::transport(format!("malformed response body: {e}")))?;
        tracing::debug!(model = %request.model, "completion received");
        Self::extract_completion(parsed)
    }
}
