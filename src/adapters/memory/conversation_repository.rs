//! In-memory `ConversationRepository`.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::conversation::{Conversation, Message, NewConversation, NewMessage};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MessageId, Timestamp};
use crate::ports::{ConversationFilter, ConversationRepository};

fn not_found(id: ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation not found: {}", id),
    )
}

#[async_trait]
impl ConversationRepository for InMemoryStore {
    async fn insert(&self, conversation: &NewConversation) -> Result<Conversation, DomainError> {
        let mut tables = self.tables.write().await;
        let id = ConversationId::new(tables.next_id());
        let created = Conversation::create(id, conversation.clone(), Timestamp::now());
        tables.conversations.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ConversationId) -> Result<Option<Conversation>, DomainError> {
        Ok(self.tables.read().await.conversations.get(&id).cloned())
    }

    async fn list(&self, filter: &ConversationFilter) -> Result<Vec<Conversation>, DomainError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Conversation> = tables
            .conversations
            .values()
            .filter(|c| filter.owner.map_or(true, |owner| c.user_id() == Some(owner)))
            .filter(|c| filter.status.map_or(true, |status| c.status() == status))
            .collect();

        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });

        Ok(matching
            .into_iter()
            .skip(filter.page.skip() as usize)
            .take(filter.page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.conversations.get_mut(&conversation.id()) {
            Some(existing) => {
                *existing = conversation.clone();
                Ok(())
            }
            None => Err(not_found(conversation.id())),
        }
    }

    async fn delete(&self, id: ConversationId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.conversations.remove(&id).is_none() {
            return Ok(false);
        }

        tables.messages.retain(|m| m.conversation_id() != id);
        for ticket in tables.tickets.values_mut() {
            if ticket.conversation_id() == Some(id) {
                ticket.detach_conversation();
            }
        }
        Ok(true)
    }

    async fn append_message(
        &self,
        conversation_id: ConversationId,
        message: &NewMessage,
    ) -> Result<Message, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.conversations.contains_key(&conversation_id) {
            return Err(not_found(conversation_id));
        }

        let id = MessageId::new(tables.next_id());
        let created = Message::create(id, conversation_id, message.clone(), Timestamp::now());
        tables.messages.push(created.clone());
        Ok(created)
    }

    async fn messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .messages
            .iter()
            .filter(|m| m.conversation_id() == conversation_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationStatus;
    use crate::domain::foundation::UserId;
    use crate::domain::ticket::NewTicket;
    use crate::ports::TicketRepository;

    async fn conversation(store: &InMemoryStore, owner: i64) -> Conversation {
        ConversationRepository::insert(
            store,
            &NewConversation::new(None, Some(UserId::new(owner))).unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn messages_are_returned_in_order() {
        let store = InMemoryStore::new();
        let c = conversation(&store, 1).await;
        store.append_message(c.id(), &NewMessage::user("first").unwrap()).await.unwrap();
        store
            .append_message(c.id(), &NewMessage::assistant("second").unwrap())
            .await
            .unwrap();

        let contents: Vec<_> = store
            .messages(c.id())
            .await
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn append_to_missing_conversation_fails() {
        let store = InMemoryStore::new();
        let err = store
            .append_message(ConversationId::new(99), &NewMessage::user("x").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConversationNotFound);
    }

    #[tokio::test]
    async fn delete_cascades_messages_and_unlinks_tickets() {
        let store = InMemoryStore::new();
        let doomed = conversation(&store, 1).await;
        let kept = conversation(&store, 1).await;
        store.append_message(doomed.id(), &NewMessage::user("a").unwrap()).await.unwrap();
        store.append_message(kept.id(), &NewMessage::user("b").unwrap()).await.unwrap();
        let ticket = TicketRepository::insert(
            &store,
            &NewTicket::new("escalated", None)
                .unwrap()
                .from_conversation(doomed.id()),
        )
        .await
        .unwrap();

        assert!(ConversationRepository::delete(&store, doomed.id()).await.unwrap());

        assert!(store.messages(doomed.id()).await.unwrap().is_empty());
        assert_eq!(store.message_count().await, 1);
        let ticket = TicketRepository::find_by_id(&store, ticket.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ticket.conversation_id(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_status() {
        let store = InMemoryStore::new();
        let older = conversation(&store, 1).await;
        let mut newer = conversation(&store, 1).await;
        newer.mark_escalated();
        ConversationRepository::update(&store, &newer).await.unwrap();

        let all = ConversationRepository::list(&store, &ConversationFilter::default())
            .await
            .unwrap();
        assert_eq!(all[0].id(), newer.id());
        assert_eq!(all[1].id(), older.id());

        let escalated = ConversationRepository::list(
            &store,
            &ConversationFilter {
                status: Some(ConversationStatus::Escalated),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(escalated.len(), 1);
    }
}
