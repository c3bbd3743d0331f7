//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the HTTP middleware injects into request
//! extensions after a bearer token has been verified and the user loaded.
//! `AuthError` describes token problems from the application's point of view,
//! independent of the JWT library that detected them.

use super::{Role, UserId};
use thiserror::Error;

/// Authenticated user resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identifier carried in the token subject.
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Contact address.
    pub email: String,

    /// Access role, re-read from storage on every request.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns true if the user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns true if the user may act on a record owned by `owner`.
    ///
    /// Admins may act on everything; regular users only on records they own.
    /// Records without an owner are admin-only.
    pub fn can_access(&self, owner: Option<UserId>) -> bool {
        self.is_admin() || owner == Some(self.id)
    }
}

/// Authentication errors that can occur during token handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token in the Authorization header or cookie.
    #[error("Not authenticated")]
    MissingToken,

    /// The token is malformed, has a bad signature, or a bad subject.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// Username/password combination rejected.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Authenticated, but the role does not allow the action.
    #[error("Not enough permissions")]
    InsufficientPermissions,

    /// Token could not be issued or the user store failed.
    #[error("Authentication service error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Creates an internal error with a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the client should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::UserNotFound
        )
    }
}
