//! DeleteConversationHandler - Removes a conversation and its messages.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::conversation::ConversationError;
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone, Copy)]
pub struct DeleteConversationCommand {
    pub conversation_id: ConversationId,
}

pub struct DeleteConversationHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl DeleteConversationHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// Linked tickets survive with their conversation link cleared.
    pub async fn handle(
        &self,
        cmd: DeleteConversationCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), ConversationError> {
        load_accessible(self.repository.as_ref(), cmd.conversation_id, actor).await?;

        if !self.repository.delete(cmd.conversation_id).await? {
            return Err(ConversationError::not_found(cmd.conversation_id));
        }

        tracing::info!(conversation_id = %cmd.conversation_id, "Conversation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::ticket::test_support::user;
    use crate::domain::conversation::{NewConversation, NewMessage};
    use crate::domain::foundation::UserId;
    use crate::domain::ticket::NewTicket;
    use crate::ports::TicketRepository;

    #[tokio::test]
    async fn cascade_removes_messages_and_unlinks_tickets() {
        let store = InMemoryStore::new();
        let conversation = ConversationRepository::insert(
            &store,
            &NewConversation::new(None, Some(UserId::new(1))).unwrap(),
        )
        .await
        .unwrap();
        store
            .append_message(conversation.id(), &NewMessage::user("help").unwrap())
            .await
            .unwrap();
        let ticket = TicketRepository::insert(
            &store,
            &NewTicket::new("Escalated", None)
                .unwrap()
                .owned_by(Some(UserId::new(1)))
                .from_conversation(conversation.id()),
        )
        .await
        .unwrap();

        let handler = DeleteConversationHandler::new(Arc::new(store.clone()));
        handler
            .handle(
                DeleteConversationCommand {
                    conversation_id: conversation.id(),
                },
                &user(1),
            )
            .await
            .unwrap();

        assert_eq!(store.conversation_count().await, 0);
        assert_eq!(store.message_count().await, 0);
        let ticket = TicketRepository::find_by_id(&store, ticket.id()).await.unwrap().unwrap();
        assert_eq!(ticket.conversation_id(), None);
    }

    #[tokio::test]
    async fn stranger_cannot_delete() {
        let store = InMemoryStore::new();
        let conversation = ConversationRepository::insert(
            &store,
            &NewConversation::new(None, Some(UserId::new(1))).unwrap(),
        )
        .await
        .unwrap();
        let handler = DeleteConversationHandler::new(Arc::new(store.clone()));

        let result = handler
            .handle(
                DeleteConversationCommand {
                    conversation_id: conversation.id(),
                },
                &user(2),
            )
            .await;
        assert_eq!(result, Err(ConversationError::Forbidden));
        assert_eq!(store.conversation_count().await, 1);
    }
}
