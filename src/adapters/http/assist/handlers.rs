//! HTTP handlers for the answer-or-escalate endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::decision::{
    AssistOrTicketCommand, AssistOrTicketHandler, ChatError, DecisionError,
    SendChatMessageCommand, SendChatMessageHandler,
};
use crate::domain::conversation::ConversationError;
use crate::domain::foundation::{ConversationId, ErrorCode};

use super::dto::{AssistRequest, AssistResponse, ChatRequest, ChatResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssistHandlers {
    assist_handler: Arc<AssistOrTicketHandler>,
    chat_handler: Arc<SendChatMessageHandler>,
}

impl AssistHandlers {
    pub fn new(
        assist_handler: Arc<AssistOrTicketHandler>,
        chat_handler: Arc<SendChatMessageHandler>,
    ) -> Self {
        Self {
            assist_handler,
            chat_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /webhook/assist-or-ticket - Answer directly or open a ticket
pub async fn assist_or_ticket(
    State(handlers): State<AssistHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<AssistRequest>,
) -> Response {
    let cmd = AssistOrTicketCommand {
        message: req.message,
        requester: user.map(|u| u.id),
    };

    match handlers.assist_handler.handle(cmd).await {
        Ok(outcome) => (StatusCode::OK, Json(AssistResponse::from(outcome))).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// POST /api/chat - Conversational answer-or-escalate
pub async fn send_chat_message(
    State(handlers): State<AssistHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<ChatRequest>,
) -> Response {
    let cmd = SendChatMessageCommand {
        message: req.message,
        conversation_id: req.conversation_id.map(ConversationId::new),
    };

    match handlers.chat_handler.handle(cmd, &user).await {
        Ok(outcome) => (StatusCode::OK, Json(ChatResponse::from(outcome))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_decision_error(error: DecisionError) -> Response {
    error_response(error.code(), error.to_string())
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::Decision(e) => handle_decision_error(e),
        ChatError::Conversation(ConversationError::NotFound(_)) => {
            error_response(ErrorCode::ConversationNotFound, "Conversation not found")
        }
        ChatError::Conversation(e) => error_response(e.code(), e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DecisionParseError;
    use crate::domain::foundation::ValidationError;
    use crate::ports::AIError;

    #[test]
    fn upstream_failures_map_to_502() {
        let error = DecisionError::Provider(AIError::network("connection reset"));
        assert_eq!(handle_decision_error(error).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unparseable_decision_maps_to_502() {
        let error = DecisionError::Unparseable(DecisionParseError::NoJsonObject);
        assert_eq!(handle_decision_error(error).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn blank_message_maps_to_400() {
        let error = DecisionError::Validation(ValidationError::empty_field("message"));
        assert_eq!(handle_decision_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn chat_conversation_errors_keep_their_status() {
        let error = ChatError::Conversation(ConversationError::Forbidden);
        assert_eq!(handle_chat_error(error).status(), StatusCode::FORBIDDEN);

        let error = ChatError::Conversation(ConversationError::not_found(ConversationId::new(4)));
        assert_eq!(handle_chat_error(error).status(), StatusCode::NOT_FOUND);
    }
}
