//! UpdateConversationHandler - Rename or change status.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::conversation::{Conversation, ConversationError, ConversationUpdate};
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct UpdateConversationCommand {
    pub conversation_id: ConversationId,
    pub update: ConversationUpdate,
}

pub struct UpdateConversationHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl UpdateConversationHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateConversationCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Conversation, ConversationError> {
        let mut conversation =
            load_accessible(self.repository.as_ref(), cmd.conversation_id, actor).await?;

        conversation.apply(cmd.update)?;
        self.repository.update(&conversation).await?;
        Ok(conversation)
    }
}
