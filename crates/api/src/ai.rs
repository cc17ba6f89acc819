//! LLM client for AI diagnostic reports.
//!
//! [`DiagnosticClient`] wraps an OpenAI-compatible chat-completions endpoint
//! using [`reqwest`]. Configuration is loaded from environment variables; if
//! `AI_API_URL` is not set, [`AiConfig::from_env`] returns `None` and the
//! diagnostic endpoints respond with 503.

use serde::Deserialize;

/// Default model name when `AI_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the LLM diagnostic endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Chat-completions URL, e.g. `https://api.openai.com/v1/chat/completions`.
    pub api_url: String,
    /// Bearer token for the endpoint.
    pub api_key: String,
    /// Model name to request.
    pub model: String,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `AI_API_URL` is not set, signalling that the
    /// diagnostic feature is not configured.
    ///
    /// | Variable     | Required | Default       |
    /// |--------------|----------|---------------|
    /// | `AI_API_URL` | yes      | —             |
    /// | `AI_API_KEY` | no       | empty         |
    /// | `AI_MODEL`   | no       | `gpt-4o-mini` |
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("AI_API_URL").ok()?;
        Some(Self {
            api_url,
            api_key: std::env::var("AI_API_KEY").unwrap_or_default(),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Errors from the diagnostic LLM client.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response did not contain a completion.
    #[error("LLM response missing completion content")]
    EmptyCompletion,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// HTTP client for a single OpenAI-compatible chat endpoint.
pub struct DiagnosticClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl DiagnosticClient {
    /// Create a new client for the configured endpoint.
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a diagnostic prompt and return the completion text.
    ///
    /// Sends a `POST` chat-completions request with a single user message and
    /// returns `choices[0].message.content`.
    pub async fn diagnose(&self, prompt: &str) -> Result<String, DiagnosticError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "user", "content": prompt },
            ],
        });

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiagnosticError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(DiagnosticError::EmptyCompletion)
    }
}
