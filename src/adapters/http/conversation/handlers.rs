//! HTTP handlers for conversation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, invalid_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::conversation::{
    AppendMessageCommand, AppendMessageHandler, CreateConversationCommand,
    CreateConversationHandler, DeleteConversationCommand, DeleteConversationHandler,
    GetConversationHandler, GetConversationQuery, ListConversationsHandler,
    ListConversationsQuery, UpdateConversationCommand, UpdateConversationHandler,
};
use crate::domain::conversation::ConversationError;
use crate::domain::foundation::ConversationId;

use super::dto::{
    AppendMessageRequest, ConversationDetailResponse, ConversationResponse,
    CreateConversationRequest, ListConversationsParams, MessageResponse,
    UpdateConversationRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConversationHandlers {
    create_handler: Arc<CreateConversationHandler>,
    get_handler: Arc<GetConversationHandler>,
    list_handler: Arc<ListConversationsHandler>,
    update_handler: Arc<UpdateConversationHandler>,
    delete_handler: Arc<DeleteConversationHandler>,
    append_handler: Arc<AppendMessageHandler>,
}

impl ConversationHandlers {
    pub fn new(
        create_handler: Arc<CreateConversationHandler>,
        get_handler: Arc<GetConversationHandler>,
        list_handler: Arc<ListConversationsHandler>,
        update_handler: Arc<UpdateConversationHandler>,
        delete_handler: Arc<DeleteConversationHandler>,
        append_handler: Arc<AppendMessageHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_handler,
            delete_handler,
            append_handler,
        }
    }
}

fn parse_id(raw: &str) -> Result<ConversationId, Response> {
    raw.parse::<ConversationId>()
        .map_err(|_| invalid_id("conversation", raw))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/conversations
pub async fn create_conversation(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateConversationRequest>,
) -> Response {
    let cmd = CreateConversationCommand { title: req.title };

    match handlers.create_handler.handle(cmd, &user).await {
        Ok(conversation) => (
            StatusCode::CREATED,
            Json(ConversationResponse::from(conversation)),
        )
            .into_response(),
        Err(e) => handle_conversation_error(e),
    }
}

/// GET /api/conversations - Newest first
pub async fn list_conversations(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListConversationsParams>,
) -> Response {
    let query = ListConversationsQuery {
        page: params.page(),
        status: params.status,
    };

    match handlers.list_handler.handle(query, &user).await {
        Ok(conversations) => {
            let response: Vec<ConversationResponse> =
                conversations.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_conversation_error(e),
    }
}

/// GET /api/conversations/:id - With messages
pub async fn get_conversation(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<String>,
) -> Response {
    let conversation_id = match parse_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetConversationQuery { conversation_id }, &user)
        .await
    {
        Ok(view) => (StatusCode::OK, Json(ConversationDetailResponse::from(view))).into_response(),
        Err(e) => handle_conversation_error(e),
    }
}

/// PATCH /api/conversations/:id
pub async fn update_conversation(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<String>,
    Json(req): Json<UpdateConversationRequest>,
) -> Response {
    let conversation_id = match parse_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateConversationCommand {
        conversation_id,
        update: req.into(),
    };

    match handlers.update_handler.handle(cmd, &user).await {
        Ok(conversation) => {
            (StatusCode::OK, Json(ConversationResponse::from(conversation))).into_response()
        }
        Err(e) => handle_conversation_error(e),
    }
}

/// DELETE /api/conversations/:id - Removes its messages too
pub async fn delete_conversation(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<String>,
) -> Response {
    let conversation_id = match parse_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteConversationCommand { conversation_id }, &user)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_conversation_error(e),
    }
}

/// POST /api/conversations/:id/messages
pub async fn append_message(
    State(handlers): State<ConversationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<String>,
    Json(req): Json<AppendMessageRequest>,
) -> Response {
    let conversation_id = match parse_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AppendMessageCommand {
        conversation_id,
        role: req.role,
        content: req.content,
    };

    match handlers.append_handler.handle(cmd, &user).await {
        Ok(message) => (StatusCode::CREATED, Json(MessageResponse::from(message))).into_response(),
        Err(e) => handle_conversation_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_conversation_error(error: ConversationError) -> Response {
    match &error {
        ConversationError::NotFound(_) => error_response(error.code(), "Conversation not found"),
        _ => error_response(error.code(), error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_maps_to_400() {
        let error = ConversationError::Archived(ConversationId::new(3));
        assert_eq!(
            handle_conversation_error(error).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ConversationError::not_found(ConversationId::new(3));
        assert_eq!(
            handle_conversation_error(error).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(
            handle_conversation_error(ConversationError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(parse_id("abc").is_err());
        assert_eq!(parse_id("12").ok(), Some(ConversationId::new(12)));
    }
}
