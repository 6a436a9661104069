//! The generation-provider port.
//!
//! The pipeline consumes a hosted text-generation service through the
//! [`LlmProvider`] trait: one prompt in, one completion out. Infrastructure
//! crates implement the trait; the domain never sees transport details.
//!
//! The credential is threaded into every call as an explicit parameter rather
//! than held in provider or process state, so concurrent or repeated runs
//! cannot interfere with each other.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::ModelId;
use crate::types::TokenUsage;

/// Default completion cap for a single generation call.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// A user-supplied API credential.
///
/// `Debug` and `Display` are redacted so the secret never reaches logs or
/// error messages. The raw value is only readable via [`ApiKey::expose`],
/// which transport adapters use to build the authorization header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a credential, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// A single-prompt generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The hosted model the request is routed to.
    pub model: ModelId,
    /// The full prompt text for this stage.
    pub prompt: String,
    /// Maximum number of completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature; `None` uses the service default.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request with the default token cap and service-default
    /// temperature.
    pub fn new(model: ModelId, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Overrides the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The generated text returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// The raw completion text.
    pub text: String,
    /// Token usage reported by the service, when available.
    pub usage: Option<TokenUsage>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single generation call.
///
/// Neither variant is retried by the pipeline; both abort the run and surface
/// unchanged to the caller.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum LlmError {
    /// The service rejected the supplied credential.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Service-reported reason, without the credential itself.
        message: String,
    },

    /// The call failed for any non-authentication reason: network failure,
    /// rate limiting, service error, or a response the adapter could not
    /// interpret.
    #[error("Generation request failed: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
}

impl LlmError {
    /// Convenience constructor for [`LlmError::Auth`].
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`LlmError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Port for the hosted text-generation service.
///
/// One call is one blocking round-trip from the pipeline's point of view: the
/// calling stage is suspended until the service responds or fails. The
/// pipeline enforces no timeout of its own; any timeout is the adapter's
/// concern.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generates a completion for `request`, authenticating with `key`.
    async fn complete(
        &self,
        key: &ApiKey,
        request: CompletionRequest,
    ) -> Result<Completion, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_redacted_in_debug_and_display() {
        let key = ApiKey::new("gsk_super_secret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert_eq!(key.expose(), "gsk_super_secret");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(ApiKey::new("").is_none());
    }

    #[test]
    fn request_builder_overrides_defaults() {
        let model = ModelId::new("qwen-2.5-32b").unwrap();
        let request = CompletionRequest::new(model, "hello")
            .with_max_tokens(1024)
            .with_temperature(0.7);
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.temperature, Some(0.7));
    }
}
