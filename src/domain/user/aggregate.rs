//! User account entity.

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks the plaintext password before it is hashed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("username"));
    }
    let len = trimmed.chars().count();
    if len < MIN_USERNAME_LENGTH {
        return Err(ValidationError::invalid_format(
            "username",
            format!("must be at least {} characters", MIN_USERNAME_LENGTH),
        ));
    }
    if len > MAX_USERNAME_LENGTH {
        return Err(ValidationError::too_long("username", MAX_USERNAME_LENGTH, len));
    }
    Ok(trimmed.to_string())
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let len = trimmed.chars().count();
    if len > MAX_EMAIL_LENGTH {
        return Err(ValidationError::too_long("email", MAX_EMAIL_LENGTH, len));
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ValidationError::invalid_format("email", "must be a valid email address")),
    }
}

/// Validated input for registering a user. Holds an already-hashed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
    password_hash: String,
    role: Role,
}

impl NewUser {
    /// # Errors
    ///
    /// - `EmptyField` / `InvalidFormat` / `TooLong` for username or email
    pub fn new(
        username: &str,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: validate_username(username)?,
            email: validate_email(email)?,
            password_hash,
            role,
        })
    }

    /// Runs the username/email checks without a password hash.
    pub fn validate_identity(username: &str, email: &str) -> Result<(), ValidationError> {
        validate_username(username)?;
        validate_email(email)?;
        Ok(())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: Timestamp,
}

impl User {
    pub fn create(id: UserId, input: NewUser, now: Timestamp) -> Self {
        Self {
            id,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: now,
        }
    }

    /// Reconstitute a user from persistence.
    pub fn reconstitute(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            role,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// PHC-format hash; never leaves the service.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> Result<NewUser, ValidationError> {
        NewUser::new(username, email, "$argon2id$hash".into(), Role::User)
    }

    #[test]
    fn valid_input_is_trimmed() {
        let u = new_user(" alice ", " alice@example.com ").unwrap();
        assert_eq!(u.username(), "alice");
        assert_eq!(u.email(), "alice@example.com");
    }

    #[test]
    fn short_username_is_rejected() {
        assert!(matches!(
            new_user("al", "al@example.com"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn long_username_is_rejected() {
        assert!(matches!(
            new_user(&"u".repeat(51), "u@example.com"),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(new_user("alice", "alice.example.com").is_err());
        assert!(new_user("alice", "@example.com").is_err());
        assert!(new_user("alice", "alice@").is_err());
    }

    #[test]
    fn long_email_is_rejected() {
        let email = format!("{}@example.com", "e".repeat(100));
        assert!(matches!(
            new_user("alice", &email),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn created_user_keeps_role() {
        let input = NewUser::new("root", "root@example.com", "h".into(), Role::Admin).unwrap();
        let user = User::create(UserId::new(1), input, Timestamp::now());
        assert!(user.role().is_admin());
    }
}
