//! RegisterUserHandler - Signup and admin bootstrap.

use std::sync::Arc;

use crate::domain::foundation::Role;
use crate::domain::user::{validate_password, NewUser, User, UserError};
use crate::ports::{PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterUserCommand {
    /// Regular signup.
    pub fn user(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: Role::User,
        }
    }

    /// Initial-setup admin account.
    pub fn admin(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            ..Self::user(username, email, password)
        }
    }
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Validates input, checks uniqueness, then stores the hashed password.
    ///
    /// The repository still enforces uniqueness, so a concurrent signup that
    /// slips past the lookups is reported the same way.
    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, UserError> {
        NewUser::validate_identity(&cmd.username, &cmd.email)?;
        validate_password(&cmd.password)?;

        if self.users.find_by_username(cmd.username.trim()).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }
        if self.users.find_by_email(cmd.email.trim()).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| UserError::infrastructure(e.to_string()))?;
        let input = NewUser::new(&cmd.username, &cmd.email, password_hash, cmd.role)?;
        let user = self.users.insert(&input).await?;

        tracing::info!(user_id = %user.id(), role = %user.role(), "User registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::user::test_support::PlainHasher;

    fn handler(store: &InMemoryStore) -> RegisterUserHandler {
        RegisterUserHandler::new(Arc::new(store.clone()), Arc::new(PlainHasher))
    }

    #[tokio::test]
    async fn registers_with_hashed_password() {
        let store = InMemoryStore::new();
        let user = handler(&store)
            .handle(RegisterUserCommand::user("alice", "alice@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(user.username(), "alice");
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.password_hash(), "plain$password123");
    }

    #[tokio::test]
    async fn admin_command_sets_role() {
        let store = InMemoryStore::new();
        let user = handler(&store)
            .handle(RegisterUserCommand::admin("root", "root@example.com", "password123"))
            .await
            .unwrap();
        assert!(user.role().is_admin());
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_reported() {
        let store = InMemoryStore::new();
        let handler = handler(&store);
        handler
            .handle(RegisterUserCommand::user("alice", "alice@example.com", "password123"))
            .await
            .unwrap();

        let same_name = handler
            .handle(RegisterUserCommand::user("alice", "other@example.com", "password123"))
            .await;
        assert_eq!(same_name.unwrap_err(), UserError::UsernameTaken);

        let same_email = handler
            .handle(RegisterUserCommand::user("bob", "alice@example.com", "password123"))
            .await;
        assert_eq!(same_email.unwrap_err(), UserError::EmailTaken);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let store = InMemoryStore::new();
        let result = handler(&store)
            .handle(RegisterUserCommand::user("alice", "alice@example.com", "short"))
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let store = InMemoryStore::new();
        let result = handler(&store)
            .handle(RegisterUserCommand::user("alice", "not-an-email", "password123"))
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }
}
