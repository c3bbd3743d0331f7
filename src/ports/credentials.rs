//! Credential ports: password hashing and access tokens.
//!
//! Both are synchronous; hashing is CPU-bound and token handling needs no I/O.

use crate::domain::foundation::{AuthError, Timestamp, UserId};

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues and verifies bearer tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token whose subject is `user_id`.
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, AuthError>;

    /// Verify signature and expiry and return the subject.
    ///
    /// # Errors
    ///
    /// - `TokenExpired` if past `exp`
    /// - `InvalidToken` for any other defect
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;

    /// Token lifetime in seconds, used for the cookie max-age.
    fn lifetime_secs(&self) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_ports_are_object_safe() {
        fn _hasher(_h: &dyn PasswordHasher) {}
        fn _tokens(_t: &dyn TokenService) {}
    }
}
