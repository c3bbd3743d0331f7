//! HTTP handlers for account and token endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_cookies::{cookie::SameSite, Cookie, Cookies};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::{auth_error_response, RequireAuth, ACCESS_TOKEN_COOKIE};
use crate::application::handlers::user::{
    LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler,
};
use crate::domain::user::UserError;

use super::dto::{LoginRequest, LogoutResponse, SignupRequest, TokenResponse, UserResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterUserHandler>,
    login_handler: Arc<LoginHandler>,
    cookie_secure: bool,
    token_lifetime_secs: i64,
}

impl AuthHandlers {
    pub fn new(
        register_handler: Arc<RegisterUserHandler>,
        login_handler: Arc<LoginHandler>,
        cookie_secure: bool,
        token_lifetime_secs: i64,
    ) -> Self {
        Self {
            register_handler,
            login_handler,
            cookie_secure,
            token_lifetime_secs,
        }
    }

    fn access_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((ACCESS_TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(time::Duration::seconds(self.token_lifetime_secs))
            .build()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /auth/signup - Register a regular user
pub async fn signup(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignupRequest>,
) -> Response {
    let cmd = RegisterUserCommand::user(req.username, req.email, req.password);
    register(&handlers, cmd).await
}

/// POST /auth/create-admin - Register an administrator (initial setup)
pub async fn create_admin(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignupRequest>,
) -> Response {
    let cmd = RegisterUserCommand::admin(req.username, req.email, req.password);
    register(&handlers, cmd).await
}

async fn register(handlers: &AuthHandlers, cmd: RegisterUserCommand) -> Response {
    match handlers.register_handler.handle(cmd).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(&user))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// POST /auth/login - Issue a token in the body and as a cookie
pub async fn login(
    State(handlers): State<AuthHandlers>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Response {
    let cmd = LoginCommand {
        username: req.username,
        password: req.password,
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(result) => {
            cookies.add(handlers.access_cookie(result.token.token.clone()));
            let response = TokenResponse::new(&result.token, &result.user);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => auth_error_response(e),
    }
}

/// GET /auth/me - Current user
pub async fn me(RequireAuth(user): RequireAuth) -> Response {
    (StatusCode::OK, Json(UserResponse::from(user))).into_response()
}

/// POST /auth/logout - Drop the token cookie
pub async fn logout(cookies: Cookies) -> Response {
    cookies.remove(Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").build());
    (
        StatusCode::OK,
        Json(LogoutResponse {
            message: "Logged out",
        }),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_user_error(error: UserError) -> Response {
    error_response(error.code(), error.to_string())
}
