//! Ticket-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, TicketId, ValidationError};

/// Errors raised by ticket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    #[error("Not enough permissions")]
    Forbidden,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl TicketError {
    pub fn not_found(id: TicketId) -> Self {
        TicketError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TicketError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TicketError::NotFound(_) => ErrorCode::TicketNotFound,
            TicketError::Forbidden => ErrorCode::Forbidden,
            TicketError::Validation(_) => ErrorCode::ValidationFailed,
            TicketError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for TicketError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                TicketError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::Forbidden => TicketError::Forbidden,
            _ => TicketError::Infrastructure(err.to_string()),
        }
    }
}
