//! LoginHandler - Exchanges credentials for a signed access token.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::user::User;
use crate::ports::{IssuedToken, PasswordHasher, TokenService, UserRepository};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: IssuedToken,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Unknown usernames and wrong passwords fail identically.
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        let user = self
            .users
            .find_by_username(cmd.username.trim())
            .await
            .map_err(|e| AuthError::internal(e.to_string()))?;

        let Some(user) = user else {
            tracing::debug!("Login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&cmd.password, user.password_hash())? {
            tracing::debug!(user_id = %user.id(), "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id())?;
        tracing::info!(user_id = %user.id(), "User logged in");

        Ok(LoginResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenService;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::user::test_support::PlainHasher;
    use crate::application::handlers::user::{RegisterUserCommand, RegisterUserHandler};
    use jsonwebtoken::Algorithm;
    use secrecy::Secret;

    async fn setup() -> (LoginHandler, Arc<JwtTokenService>) {
        let store = InMemoryStore::new();
        RegisterUserHandler::new(Arc::new(store.clone()), Arc::new(PlainHasher))
            .handle(RegisterUserCommand::user("alice", "alice@example.com", "password123"))
            .await
            .unwrap();

        let tokens = Arc::new(
            JwtTokenService::new(&Secret::new("test-secret".to_string()), Algorithm::HS256, 24)
                .unwrap(),
        );
        let handler = LoginHandler::new(Arc::new(store), Arc::new(PlainHasher), tokens.clone());
        (handler, tokens)
    }

    #[tokio::test]
    async fn valid_credentials_issue_verifiable_token() {
        let (handler, tokens) = setup().await;
        let result = handler
            .handle(LoginCommand {
                username: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(tokens.verify(&result.token.token).unwrap(), result.user.id());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let (handler, _) = setup().await;
        for (username, password) in [("alice", "wrong-password"), ("mallory", "password123")] {
            let err = handler
                .handle(LoginCommand {
                    username: username.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err, AuthError::InvalidCredentials);
        }
    }
}
