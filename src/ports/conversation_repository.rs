//! Conversation repository port.
//!
//! Conversations own their messages: deleting a conversation removes every
//! message in it and unlinks tickets that were escalated from it.

use async_trait::async_trait;

use super::Pagination;
use crate::domain::conversation::{
    Conversation, ConversationStatus, Message, NewConversation, NewMessage,
};
use crate::domain::foundation::{ConversationId, DomainError, UserId};

/// Criteria for listing conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationFilter {
    pub status: Option<ConversationStatus>,
    /// Restricts results to one owner. `None` means all conversations.
    pub owner: Option<UserId>,
    pub page: Pagination,
}

/// Repository port for conversations and their messages.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert a new active conversation; storage assigns the id.
    async fn insert(&self, conversation: &NewConversation) -> Result<Conversation, DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// Conversations matching the filter, newest first.
    async fn list(&self, filter: &ConversationFilter) -> Result<Vec<Conversation>, DomainError>;

    /// Persist title, status and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Delete a conversation and all of its messages atomically.
    ///
    /// Returns `false` if it did not exist.
    async fn delete(&self, id: ConversationId) -> Result<bool, DomainError>;

    /// Append a message; storage assigns id and timestamp.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn append_message(
        &self,
        conversation_id: ConversationId,
        message: &NewMessage,
    ) -> Result<Message, DomainError>;

    /// Messages of a conversation ordered by creation time, then id.
    async fn messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>, DomainError>;
}
