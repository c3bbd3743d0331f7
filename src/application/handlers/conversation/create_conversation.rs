//! CreateConversationHandler - Command handler for starting conversations.

use std::sync::Arc;

use crate::domain::conversation::{Conversation, ConversationError, NewConversation};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::ConversationRepository;

/// Command to start a conversation. A blank title is stored as none and
/// derived later from the first user message.
#[derive(Debug, Clone, Default)]
pub struct CreateConversationCommand {
    pub title: Option<String>,
}

pub struct CreateConversationHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl CreateConversationHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateConversationCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Conversation, ConversationError> {
        let input = NewConversation::new(cmd.title, Some(actor.id))?;
        let conversation = self.repository.insert(&input).await?;

        tracing::debug!(conversation_id = %conversation.id(), "Conversation created");
        Ok(conversation)
    }
}
