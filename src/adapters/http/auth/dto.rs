//! HTTP DTOs for account and token endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::user::User;
use crate::ports::IssuedToken;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: Some(user.created_at().to_rfc3339()),
        }
    }
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: None,
        }
    }
}

/// Issued bearer token. The same value is also set as a cookie.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: String,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn new(token: &IssuedToken, user: &User) -> Self {
        Self {
            access_token: token.token.clone(),
            token_type: "bearer",
            expires_at: token.expires_at.to_rfc3339(),
            user: UserResponse::from(user),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}
