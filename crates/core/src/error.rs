//! Error types for the chatbot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

/// Failures while building a pattern table.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("Invalid matcher for topic '{topic}': {reason}")]
    InvalidMatcher { topic: String, reason: String },

    #[error("Topic '{0}' has no candidate replies")]
    EmptyCandidates(String),

    #[error("Fallback reply list is empty")]
    EmptyFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("User not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_error_displays_correctly() {
        let err = PatternError::InvalidMatcher {
            topic: "greeting".into(),
            reason: "unclosed group".into(),
        };
        assert!(err.to_string().contains("greeting"));
        assert!(err.to_string().contains("unclosed group"));
    }

    #[test]
    fn not_found_names_the_user() {
        let err = ConversationError::NotFound("bob".into());
        assert_eq!(err.to_string(), "User not found: bob");
    }
}
