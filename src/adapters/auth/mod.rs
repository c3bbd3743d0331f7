//! Authentication adapters.
//!
//! Implementations of the credential ports:
//!
//! - `Argon2Hasher` - Argon2id password hashing
//! - `JwtTokenService` - HMAC-signed JWT access tokens

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2Hasher;
pub use jwt::{AccessClaims, JwtTokenService};
