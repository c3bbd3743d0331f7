//! HTTP routes for the answer-or-escalate endpoints.

use axum::{routing::post, Router};

use super::handlers::{assist_or_ticket, send_chat_message, AssistHandlers};

/// Webhook router, mounted at `/webhook`.
pub fn webhook_routes(handlers: AssistHandlers) -> Router {
    Router::new()
        .route("/assist-or-ticket", post(assist_or_ticket))
        .with_state(handlers)
}

/// Chat router, mounted at `/api/chat`.
pub fn chat_routes(handlers: AssistHandlers) -> Router {
    Router::new()
        .route("/", post(send_chat_message))
        .with_state(handlers)
}
