//! Domain Errors - client-side rule violations
//!
//! Contains ONLY state-machine and form validation errors, no transport errors

use thiserror::Error;

/// Errors raised by the client-side state machines and form validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Tree lookup: the path is not part of the fetched tree
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Form validation: required field left empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Form validation: rating outside 1..=5
    #[error("Invalid rating: {0}, must be between 1 and 5")]
    InvalidRating(u8),

    /// Form validation: feedback text exceeds the allowed length
    #[error("Feedback is too long: {length} characters, maximum allowed: {max}")]
    FeedbackTooLong { length: usize, max: usize },

    /// Generation setup: nothing selected in the file tree
    #[error("No files selected")]
    EmptySelection,

    /// Chat: blank message
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Chat: project has not been vectorized yet
    #[error("Project '{0}' is not vectorized")]
    NotVectorized(String),

    /// A request of the same kind is already in flight
    #[error("A request is already in progress")]
    RequestInFlight,

    /// Upload validation
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Unknown enumeration value coming from user input
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is a form validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingField(_)
                | DomainError::InvalidRating(_)
                | DomainError::FeedbackTooLong { .. }
                | DomainError::EmptySelection
                | DomainError::EmptyMessage
                | DomainError::InvalidUpload(_)
                | DomainError::InvalidValue { .. }
        )
    }

    /// Check if error is a state rule violation (control should be disabled)
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            DomainError::NotVectorized(_) | DomainError::RequestInFlight
        )
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        if self.is_validation_error() {
            ErrorCategory::Validation
        } else if self.is_state_error() {
            ErrorCategory::State
        } else {
            ErrorCategory::NotFound
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Action not allowed in the current state
    State,
    /// Lookup failures
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        assert_eq!(
            DomainError::InvalidRating(7).category(),
            ErrorCategory::Validation
        );
        assert_eq!(DomainError::RequestInFlight.category(), ErrorCategory::State);
        assert_eq!(
            DomainError::NodeNotFound("src".to_string()).category(),
            ErrorCategory::NotFound
        );
    }

    #[test]
    fn test_error_messages() {
        let error = DomainError::FeedbackTooLong {
            length: 612,
            max: 500,
        };
        assert!(error.to_string().contains("612"));
        assert!(error.to_string().contains("500"));
    }
}
