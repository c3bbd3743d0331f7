//! HMAC-signed JWT access tokens.
//!
//! Claims: `sub` (user id as a decimal string), `iat`, `exp` and a random
//! `jti`. Expiry is validated with zero leeway.

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MAX_TOKEN_LIFETIME_HOURS;
use crate::domain::foundation::{AuthError, Timestamp, UserId};
use crate::ports::{IssuedToken, TokenService};

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Issues and verifies HS256/HS384/HS512 tokens.
pub struct JwtTokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_hours: i64,
}

impl JwtTokenService {
    /// # Errors
    ///
    /// - `Internal` if the algorithm is not an HMAC variant
    pub fn new(
        secret: &Secret<String>,
        algorithm: Algorithm,
        lifetime_hours: i64,
    ) -> Result<Self, AuthError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AuthError::internal(format!(
                "unsupported token algorithm {:?}; expected HS256, HS384 or HS512",
                algorithm
            )));
        }
        if !(1..=MAX_TOKEN_LIFETIME_HOURS).contains(&lifetime_hours) {
            return Err(AuthError::internal(format!(
                "token lifetime {}h outside 1..={}h",
                lifetime_hours, MAX_TOKEN_LIFETIME_HOURS
            )));
        }

        let key = secret.expose_secret().as_bytes();
        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            lifetime_hours,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }

    fn claims_for(&self, user_id: UserId, now: Timestamp) -> AccessClaims {
        AccessClaims {
            sub: user_id.to_string(),
            iat: now.unix_seconds(),
            exp: now.plus_hours(self.lifetime_hours).unix_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    fn sign(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Token signing failed: {}", e)))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let claims = self.claims_for(user_id, now);
        let token = self.sign(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: now.plus_hours(self.lifetime_hours),
        })
    }

    fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            },
        )?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidToken)
    }

    fn lifetime_secs(&self) -> i64 {
        self.lifetime_hours * 3600
    }
}
