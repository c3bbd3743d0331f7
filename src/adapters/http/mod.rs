//! HTTP adapters - REST API implementations.
//!
//! Each module has its own HTTP adapter (dto, handlers, routes); this module
//! assembles them into the application router.
//!
//! ```text
//! CookieManager → Trace → CORS → Timeout → auth_middleware → module routers
//! ```

pub mod assist;
pub mod auth;
pub mod conversation;
pub mod error;
pub mod middleware;
pub mod state;
pub mod ticket;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;

pub use error::ErrorResponse;
pub use middleware::{auth_middleware, OptionalAuth, RequireAuth, ACCESS_TOKEN_COOKIE};
pub use state::{AppDependencies, AppState};

/// GET /ping - Liveness probe
async fn ping() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// CORS for the configured origins. Without origins no cross-origin
/// request is allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Builds the full application router.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let routes = Router::new()
        .nest("/auth", auth::auth_routes(state.auth.clone()))
        .nest("/api/tickets", ticket::ticket_routes(state.tickets.clone()))
        .nest(
            "/api/conversations",
            conversation::conversation_routes(state.conversations.clone()),
        )
        .nest("/api/chat", assist::chat_routes(state.assist.clone()))
        .nest("/webhook", assist::webhook_routes(state.assist.clone()))
        .layer(from_fn_with_state(state.authenticator.clone(), auth_middleware));

    Router::new()
        .route("/ping", get(ping))
        .merge(routes)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .layer(CookieManagerLayer::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_reports_ok() {
        let Json(body) = ping().await;
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[test]
    fn unparseable_origins_are_skipped() {
        // Must not panic when every origin is invalid
        let _ = cors_layer(&["not a header\u{7f}".to_string()]);
        let _ = cors_layer(&["http://localhost:5173".to_string()]);
    }
}
