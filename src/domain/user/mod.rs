//! User accounts.

mod aggregate;
mod errors;

pub use aggregate::{
    validate_password, NewUser, User, MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};
pub use errors::UserError;
