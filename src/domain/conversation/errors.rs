//! Conversation-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, ValidationError};

/// Errors raised by conversation and message operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("Not enough permissions")]
    Forbidden,

    #[error("Conversation {0} is archived")]
    Archived(ConversationId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ConversationError {
    pub fn not_found(id: ConversationId) -> Self {
        ConversationError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ConversationError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConversationError::NotFound(_) => ErrorCode::ConversationNotFound,
            ConversationError::Forbidden => ErrorCode::Forbidden,
            ConversationError::Archived(_) | ConversationError::Validation(_) => {
                ErrorCode::ValidationFailed
            }
            ConversationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ConversationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                ConversationError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::Forbidden => ConversationError::Forbidden,
            _ => ConversationError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_maps_to_validation_code() {
        assert_eq!(
            ConversationError::Archived(ConversationId::new(1)).code(),
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: ConversationError = DomainError::database("load", "timeout").into();
        assert!(matches!(err, ConversationError::Infrastructure(_)));
    }
}
