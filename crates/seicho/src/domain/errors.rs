//! Domain Errors
//!
//! Error types for progression engine operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failure_class() {
        assert_eq!(
            DomainError::validation("XP delta must be positive").to_string(),
            "Validation error: XP delta must be positive"
        );
        assert_eq!(
            DomainError::Repository("connection refused".to_string()).to_string(),
            "Repository error: connection refused"
        );
        assert_eq!(
            DomainError::Serialization("unexpected blob shape".to_string()).to_string(),
            "Serialization error: unexpected blob shape"
        );
    }
}
