//! AppendMessageHandler - Adds a message to an existing conversation.
//!
//! Only admins may post `assistant` or `system` messages. The first user
//! message names an untitled conversation.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::conversation::{ConversationError, Message, MessageRole, NewMessage};
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct AppendMessageCommand {
    pub conversation_id: ConversationId,
    pub role: MessageRole,
    pub content: String,
}

pub struct AppendMessageHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl AppendMessageHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AppendMessageCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Message, ConversationError> {
        if cmd.role != MessageRole::User && !actor.is_admin() {
            return Err(ConversationError::Forbidden);
        }

        let mut conversation =
            load_accessible(self.repository.as_ref(), cmd.conversation_id, actor).await?;
        conversation.ensure_accepts_messages()?;

        let input = NewMessage::new(cmd.role, cmd.content)?;
        let message = self
            .repository
            .append_message(conversation.id(), &input)
            .await?;

        conversation.record_message(message.role() == MessageRole::User, message.content());
        self.repository.update(&conversation).await?;

        Ok(message)
    }
}
