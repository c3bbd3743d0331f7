//! GetConversationHandler - Query handler returning a conversation with its
//! messages in creation order.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::conversation::{Conversation, ConversationError, Message};
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetConversationQuery {
    pub conversation_id: ConversationId,
}

/// A conversation together with its ordered messages.
#[derive(Debug, Clone)]
pub struct ConversationWithMessages {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

pub struct GetConversationHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl GetConversationHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetConversationQuery,
        actor: &AuthenticatedUser,
    ) -> Result<ConversationWithMessages, ConversationError> {
        let conversation =
            load_accessible(self.repository.as_ref(), query.conversation_id, actor).await?;
        let messages = self.repository.messages(conversation.id()).await?;

        Ok(ConversationWithMessages {
            conversation,
            messages,
        })
    }
}
