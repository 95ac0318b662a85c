//! Error types for the board engine and its collaborators.

use thiserror::Error;

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while operating on boards, projects and the store.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Malformed or empty required input.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Referenced id does not exist in the given board or store.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Sprint status change not permitted from its current state.
    #[error("cannot {action} sprint '{sprint}' while it is {from}")]
    InvalidStateTransition {
        sprint: String,
        from: String,
        action: String,
    },

    /// Externally produced data (generator output, stored document) breaks an invariant.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Configuration file could not be understood.
    #[error("config error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}

/// Reject blank text, returning it trimmed.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BoardError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::not_found("column", "todo");
        assert_eq!(err.to_string(), "column not found: todo");

        let err = BoardError::InvalidStateTransition {
            sprint: "s1".into(),
            from: "planned".into(),
            action: "complete".into(),
        };
        assert_eq!(err.to_string(), "cannot complete sprint 's1' while it is planned");
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("title", "  Review  ").unwrap(), "Review");
        let err = require_text("title", "   ").unwrap_err();
        assert!(err.is_validation());
    }
}
