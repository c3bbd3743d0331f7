//! AuthenticateHandler - Resolves a bearer token to the current user.
//!
//! The role is re-read from storage on every request so demotions take
//! effect without waiting for token expiry.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{TokenService, UserRepository};

pub struct AuthenticateHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl AuthenticateHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let user_id = self.tokens.verify(token)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthError::internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthenticatedUser::new(
            user.id(),
            user.username(),
            user.email(),
            user.role(),
        ))
    }
}
