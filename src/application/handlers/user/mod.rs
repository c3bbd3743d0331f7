//! User account handlers: registration, login and token authentication.

mod authenticate;
mod login;
mod register_user;

pub use authenticate::AuthenticateHandler;
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::foundation::AuthError;
    use crate::ports::PasswordHasher;

    /// Reversible stand-in so tests don't pay for Argon2.
    pub struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("plain${}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("plain${}", password))
        }
    }
}
