//! HTTP adapter for account and token endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{LoginRequest, LogoutResponse, SignupRequest, TokenResponse, UserResponse};
pub use handlers::AuthHandlers;
pub use routes::auth_routes;
