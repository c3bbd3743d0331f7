//! HTTP routes for account and token endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_admin, login, logout, me, signup, AuthHandlers};

/// Creates the auth router, mounted at `/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/create-admin", post(create_admin))
        .with_state(handlers)
}
