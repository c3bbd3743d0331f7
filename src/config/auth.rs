//! Authentication configuration

use jsonwebtoken::Algorithm;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum signing key length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Longest accepted access-token lifetime (one year).
pub const MAX_TOKEN_LIFETIME_HOURS: i64 = 8760;

/// Token signing and cookie settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing key
    pub secret_key: Secret<String>,

    /// One of HS256, HS384, HS512
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_expire_hours")]
    pub access_token_expire_hours: i64,

    /// Adds the `Secure` attribute to the access-token cookie
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: Secret::new(secret_key.into()),
            algorithm: default_algorithm(),
            access_token_expire_hours: default_expire_hours(),
            cookie_secure: false,
        }
    }

    /// Parsed signing algorithm; only HMAC variants are accepted.
    pub fn jwt_algorithm(&self) -> Result<Algorithm, ValidationError> {
        match self.algorithm.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(ValidationError::UnsupportedAlgorithm(self.algorithm.clone())),
        }
    }

    /// Validate authentication configuration
    ///
    /// Any non-empty key is accepted outside production.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let key_len = self.secret_key.expose_secret().len();
        if key_len == 0 {
            return Err(ValidationError::MissingRequired("AUTH__SECRET_KEY"));
        }
        if environment == Environment::Production && key_len < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::SecretKeyTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }
        self.jwt_algorithm()?;
        if !(1..=MAX_TOKEN_LIFETIME_HOURS).contains(&self.access_token_expire_hours) {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expire_hours() -> i64 {
    24
}
