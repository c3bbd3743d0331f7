//! User account error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while registering or loading users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Username already registered")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::UsernameTaken | UserError::EmailTaken => ErrorCode::Conflict,
            UserError::Validation(_) => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match (err.code, err.detail("field")) {
            (ErrorCode::Conflict, Some("email")) => UserError::EmailTaken,
            (ErrorCode::Conflict, _) => UserError::UsernameTaken,
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_on_email_maps_to_email_taken() {
        let err: UserError = DomainError::conflict("email", "duplicate").into();
        assert_eq!(err, UserError::EmailTaken);
    }

    #[test]
    fn conflict_on_username_maps_to_username_taken() {
        let err: UserError = DomainError::conflict("username", "duplicate").into();
        assert_eq!(err, UserError::UsernameTaken);
        assert_eq!(err.to_string(), "Username already registered");
    }
}
