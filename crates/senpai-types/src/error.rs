use thiserror::Error;

use crate::llm::LlmError;

/// Errors from chat relay operations.
///
/// Validation failures are rejected before any shared state or remote
/// access; generation failures preserve the underlying provider cause
/// for server-side logging.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("chat '{0}' not found")]
    SessionNotFound(String),

    #[error("generation failed")]
    GenerationFailed(#[source] LlmError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = ChatError::InvalidRequest("prompt must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid request: prompt must not be empty");
    }

    #[test]
    fn test_session_not_found_display() {
        let err = ChatError::SessionNotFound("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_generation_failed_preserves_source() {
        use std::error::Error as _;

        let err = ChatError::GenerationFailed(LlmError::RateLimited);
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "rate limited");
    }
}
