//! HTTP DTOs for conversation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ConversationWithMessages;
use crate::domain::conversation::{
    Conversation, ConversationStatus, ConversationUpdate, Message, MessageRole,
};
use crate::domain::decision::DecisionAction;
use crate::ports::Pagination;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<ConversationStatus>,
}

impl From<UpdateConversationRequest> for ConversationUpdate {
    fn from(req: UpdateConversationRequest) -> Self {
        ConversationUpdate {
            title: req.title,
            status: req.status,
        }
    }
}

/// Message to append. `role` defaults to `user`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendMessageRequest {
    #[serde(default)]
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConversationsParams {
    #[serde(default)]
    pub status: Option<ConversationStatus>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListConversationsParams {
    pub fn page(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: i64,
    pub title: Option<String>,
    pub status: ConversationStatus,
    pub user_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().as_i64(),
            title: conversation.title().map(str::to_string),
            status: conversation.status(),
            user_id: conversation.user_id().map(|id| id.as_i64()),
            created_at: conversation.created_at().to_rfc3339(),
            updated_at: conversation.updated_at().to_rfc3339(),
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self::from(&conversation)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub ai_confidence: Option<f64>,
    pub ai_action: Option<DecisionAction>,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id().as_i64(),
            conversation_id: message.conversation_id().as_i64(),
            role: message.role(),
            content: message.content().to_string(),
            ai_confidence: message.ai_confidence(),
            ai_action: message.ai_action(),
            created_at: message.created_at().to_rfc3339(),
        }
    }
}

/// Conversation with its messages in chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationDetailResponse {
    #[serde(flatten)]
    pub conversation: ConversationResponse,
    pub messages: Vec<MessageResponse>,
}

impl From<ConversationWithMessages> for ConversationDetailResponse {
    fn from(view: ConversationWithMessages) -> Self {
        Self {
            conversation: ConversationResponse::from(&view.conversation),
            messages: view.messages.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_request_role_defaults_to_user() {
        let req: AppendMessageRequest = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert_eq!(req.role, MessageRole::User);
    }

    #[test]
    fn append_request_accepts_explicit_role() {
        let req: AppendMessageRequest =
            serde_json::from_str(r#"{"role": "system", "content": "note"}"#).unwrap();
        assert_eq!(req.role, MessageRole::System);
    }

    #[test]
    fn update_request_converts_to_domain_update() {
        let req: UpdateConversationRequest =
            serde_json::from_str(r#"{"status": "archived"}"#).unwrap();
        let update: ConversationUpdate = req.into();
        assert_eq!(update.status, Some(ConversationStatus::Archived));
        assert!(update.title.is_none());
    }
}
