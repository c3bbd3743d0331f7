//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Resolves the access token and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser or AuthFailure in extensions
//!                                      ↓
//!                              Handler → RequireAuth / OptionalAuth
//! ```
//!
//! The token is taken from `Authorization: Bearer <token>` first and from
//! the `access_token` cookie otherwise. The middleware never rejects a
//! request itself; routes decide whether authentication is required.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tower_cookies::Cookies;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::AuthenticateHandler;
use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Auth middleware state - resolves tokens to users.
pub type AuthState = Arc<AuthenticateHandler>;

/// Why a presented token was not accepted. Stored in request extensions
/// so `RequireAuth` can report the specific reason.
#[derive(Debug, Clone)]
pub struct AuthFailure(pub AuthError);

/// Extracts the raw token from the request, header before cookie.
fn extract_token(request: &Request, cookies: &Cookies) -> Option<String> {
    let from_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        cookies
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Authentication middleware.
///
/// On success injects `AuthenticatedUser`; on a rejected token injects
/// `AuthFailure`; without a token continues untouched.
pub async fn auth_middleware(
    State(authenticator): State<AuthState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&request, &cookies) {
        match authenticator.handle(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(reason = %e, "Access token rejected");
                request.extensions_mut().insert(AuthFailure(e));
            }
        }
    }

    next.run(request).await
}

/// Extractor that requires authentication.
///
/// ```ignore
/// async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     user.username
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
                return Ok(RequireAuth(user.clone()));
            }
            let error = parts
                .extensions
                .get::<AuthFailure>()
                .map(|f| f.0.clone())
                .unwrap_or(AuthError::MissingToken);
            Err(AuthRejection(error))
        })
    }
}

/// Extractor for optional authentication.
///
/// Rejected tokens are treated like no token at all.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        auth_error_response(self.0)
    }
}

/// Maps an `AuthError` to its HTTP response.
pub fn auth_error_response(error: AuthError) -> Response {
    match error {
        AuthError::InsufficientPermissions => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(error.to_string())),
        )
            .into_response(),
        AuthError::Internal(msg) => {
            tracing::error!(error = %msg, "Authentication failed internally");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
        other => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized(other.to_string())),
        )
            .into_response(),
    }
}
