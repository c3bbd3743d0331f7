//! HTTP routes for conversation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    append_message, create_conversation, delete_conversation, get_conversation,
    list_conversations, update_conversation, ConversationHandlers,
};

/// Creates the conversation router, mounted at `/api/conversations`.
pub fn conversation_routes(handlers: ConversationHandlers) -> Router {
    Router::new()
        .route("/", post(create_conversation).get(list_conversations))
        .route(
            "/:id",
            get(get_conversation)
                .patch(update_conversation)
                .delete(delete_conversation),
        )
        .route("/:id/messages", post(append_message))
        .with_state(handlers)
}
