//! In-memory `UserRepository`.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username() == user.username()) {
            return Err(DomainError::conflict("username", "Username already registered"));
        }
        if tables.users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::conflict("email", "Email already registered"));
        }

        let id = UserId::new(tables.next_id());
        let created = User::create(id, user.clone(), Timestamp::now());
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Role};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser::new(username, email, "hash".into(), Role::User).unwrap()
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let store = InMemoryStore::new();
        let user = UserRepository::insert(&store, &new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        let by_email = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_name.id(), user.id());
        assert_eq!(by_email.id(), user.id());
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = InMemoryStore::new();
        UserRepository::insert(&store, &new_user("alice", "a@example.com")).await.unwrap();
        let err = UserRepository::insert(&store, &new_user("alice", "b@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.detail("field"), Some("username"));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        UserRepository::insert(&store, &new_user("alice", "a@example.com")).await.unwrap();
        let err = UserRepository::insert(&store, &new_user("bob", "a@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.detail("field"), Some("email"));
    }
}
