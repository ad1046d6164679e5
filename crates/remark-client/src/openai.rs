//! OpenAI-compatible chat-completions client
//!
//! Sends one two-message (system + user) chat completion per request and
//! classifies every failure into the `ClientError` taxonomy so the
//! pipeline's error policy can dispatch on kinds.
//!
//! No retry, caching, or rate limiting happens here; a throttled or timed
//! out request surfaces as the corresponding error kind.
//!
//! # Examples
//!
//! ```no_run
//! use remark_client::OpenAiClient;
//!
//! let client = OpenAiClient::new("sk-...", "gpt-4");
//! ```

use crate::{ClientError, CompletionClient, CompletionRequest};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for an OpenAI-compatible chat-completions API
///
/// Owns the credential and the model identifier; both are fixed at
/// construction rather than read from ambient environment.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// One role-tagged message
#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response body for the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Error envelope many OpenAI-compatible services return
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Create a new client against the default endpoint
    ///
    /// # Parameters
    ///
    /// - `api_key`: access credential, resolved by the caller at startup
    /// - `model`: model identifier (e.g., "gpt-4")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(api_key, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with a custom per-request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Point the client at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The model identifier this client sends with every request
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
        };

        debug!("POST {} (model: {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let detail = response
                .text()
                .map(extract_error_message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(classify_http_failure(status, retry_after, detail));
        }

        let completion: ChatResponse = response.json().map_err(|e| {
            ClientError::Service(format!("undecodable completion envelope: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClientError::Service("completion contained no choices".to_string()))
    }
}

/// Map a transport-level send failure onto the error taxonomy
fn classify_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(err.to_string())
    } else {
        ClientError::Connection(err.to_string())
    }
}

/// Map a non-success HTTP status onto the error taxonomy
fn classify_http_failure(
    status: StatusCode,
    retry_after: Option<String>,
    detail: String,
) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::Authentication(format!("HTTP {}: {}", status, detail))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let hint = retry_after
                .map(|secs| format!(" (retry after {}s)", secs))
                .unwrap_or_default();
            ClientError::RateLimited(format!("HTTP {}: {}{}", status, detail, hint))
        }
        _ => ClientError::Service(format!("HTTP {}: {}", status, detail)),
    }
}

/// Pull the human-readable message out of a JSON error envelope, if any
fn extract_error_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}
