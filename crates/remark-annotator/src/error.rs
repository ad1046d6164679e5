//! Error types for the annotation pipeline

use remark_client::ClientError;
use thiserror::Error;

/// Errors that can fail a record during annotation
///
/// Completion failures keep their classified kind from the client; a reply
/// that does not match the expected three-line shape surfaces as
/// `MalformedResponse`. Both share the same disposition under the
/// configured failure policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotatorError {
    /// Classified failure from the completion service
    #[error("completion failed: {0}")]
    Completion(#[from] ClientError),

    /// Reply did not match the expected three-line structured shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AnnotatorError {
    /// Stable label for this failure kind, used by the failure log
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotatorError::Completion(e) => e.kind(),
            AnnotatorError::MalformedResponse(_) => "malformed_response",
            AnnotatorError::Config(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_kind_passes_through() {
        let err = AnnotatorError::from(ClientError::Timeout("30s elapsed".to_string()));
        assert_eq!(err.kind(), "request_timeout");
    }

    #[test]
    fn test_malformed_response_kind() {
        let err = AnnotatorError::MalformedResponse("only 2 lines".to_string());
        assert_eq!(err.kind(), "malformed_response");
    }
}
