//! Remark Completion-Service Boundary
//!
//! Pluggable completion-service clients for the annotation pipeline.
//!
//! # Architecture
//!
//! This crate defines the `CompletionClient` trait that the pipeline in
//! `remark-annotator` calls once per record, together with the classified
//! error taxonomy every implementation must surface. Implementations raise
//! one of the `ClientError` kinds rather than a generic error so the
//! pipeline can dispatch on failures uniformly.
//!
//! # Clients
//!
//! - `MockClient`: Deterministic mock for testing
//! - `OpenAiClient`: OpenAI-compatible chat-completions API over HTTP
//!
//! # Examples
//!
//! ```
//! use remark_client::{CompletionClient, CompletionRequest, MockClient};
//!
//! let client = MockClient::new("Sentiment: Positive\nCategory: Delivery\nKey Themes: fast delivery");
//! let request = CompletionRequest {
//!     system: "You are a helpful assistant.".to_string(),
//!     user: "Analyze the following comment: ...".to_string(),
//! };
//! let reply = client.complete(&request).unwrap();
//! assert!(reply.starts_with("Sentiment:"));
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiClient;

/// Classified failures raised by completion-service clients
///
/// Each variant corresponds to one failure kind of the pipeline's error
/// policy; clients must not collapse these into a generic error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Credential rejected by the completion service
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// Completion service throttled the request
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// Network-level failure reaching the service
    #[error("connection failure: {0}")]
    Connection(String),

    /// Service did not respond within the allotted time
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Any other service-reported failure
    #[error("service error: {0}")]
    Service(String),
}

impl ClientError {
    /// Stable label for this failure kind, used by the failure log
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Authentication(_) => "authentication_failure",
            ClientError::RateLimited(_) => "rate_limit_exceeded",
            ClientError::Connection(_) => "connection_failure",
            ClientError::Timeout(_) => "request_timeout",
            ClientError::Service(_) => "service_error",
        }
    }
}

/// One rendered request to the completion service
///
/// The model identifier is not part of the request; it belongs to the
/// client that sends it (see `OpenAiClient::new`). Built fresh per record
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System-role instruction
    pub system: String,

    /// User-role instruction containing the rendered prompt
    pub user: String,
}

/// Trait for completion-service clients
///
/// `complete` is synchronous and blocking; the pipeline calls it from a
/// blocking task, one record at a time. No retry, caching, or rate
/// limiting happens inside the client.
pub trait CompletionClient {
    /// Send one request and return the raw reply text
    fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError>;
}

/// Mock completion client for deterministic testing
///
/// Returns pre-configured replies without any network calls. Replies and
/// injected failures are keyed by the request's user content.
///
/// # Examples
///
/// ```
/// use remark_client::{CompletionClient, CompletionRequest, ClientError, MockClient};
///
/// let mut client = MockClient::new("Sentiment: Neutral\nCategory: Other\nKey Themes: none");
/// client.add_reply("prompt1", "Sentiment: Positive\nCategory: Delivery\nKey Themes: fast");
/// client.add_failure("prompt2", ClientError::RateLimited("slow down".to_string()));
///
/// let request = |user: &str| CompletionRequest {
///     system: String::new(),
///     user: user.to_string(),
/// };
/// assert!(client.complete(&request("prompt1")).unwrap().contains("Positive"));
/// assert!(client.complete(&request("prompt2")).is_err());
/// assert_eq!(client.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockClient {
    default_reply: String,
    replies: Arc<Mutex<HashMap<String, Result<String, ClientError>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockClient {
    /// Create a new MockClient with a fixed reply for all requests
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            replies: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific reply for a request with the given user content
    pub fn add_reply(&mut self, user: impl Into<String>, reply: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .insert(user.into(), Ok(reply.into()));
    }

    /// Inject a classified failure for a request with the given user content
    pub fn add_failure(&mut self, user: impl Into<String>, error: ClientError) {
        self.replies.lock().unwrap().insert(user.into(), Err(error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("Sentiment: Neutral\nCategory: Other\nKey Themes: none")
    }
}

impl CompletionClient for MockClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        *self.call_count.lock().unwrap() += 1;

        let replies = self.replies.lock().unwrap();
        if let Some(reply) = replies.get(&request.user) {
            return reply.clone();
        }

        Ok(self.default_reply.clone())
    }
}
