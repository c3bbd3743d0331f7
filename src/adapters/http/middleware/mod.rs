//! HTTP middleware for axum.
//!
//! - `auth` - Token resolution middleware and extractors

pub mod auth;

pub use auth::{
    auth_error_response, auth_middleware, AuthFailure, AuthRejection, AuthState, OptionalAuth,
    RequireAuth, ACCESS_TOKEN_COOKIE,
};
