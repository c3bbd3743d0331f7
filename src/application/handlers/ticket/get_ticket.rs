//! GetTicketHandler - Query handler for a single ticket.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::foundation::{AuthenticatedUser, TicketId};
use crate::domain::ticket::{Ticket, TicketError};
use crate::ports::TicketRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetTicketQuery {
    pub ticket_id: TicketId,
}

pub struct GetTicketHandler {
    repository: Arc<dyn TicketRepository>,
}

impl GetTicketHandler {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetTicketQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Ticket, TicketError> {
        load_accessible(self.repository.as_ref(), query.ticket_id, actor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::ticket::test_support::{admin, user};
    use crate::domain::ticket::NewTicket;

    async fn seed(store: &InMemoryStore, owner: Option<i64>) -> Ticket {
        let input = NewTicket::new("Printer jam", None)
            .unwrap()
            .owned_by(owner.map(crate::domain::foundation::UserId::new));
        TicketRepository::insert(store, &input).await.unwrap()
    }

    #[tokio::test]
    async fn owner_can_read() {
        let store = InMemoryStore::new();
        let ticket = seed(&store, Some(1)).await;
        let handler = GetTicketHandler::new(Arc::new(store));

        let found = handler
            .handle(GetTicketQuery { ticket_id: ticket.id() }, &user(1))
            .await
            .unwrap();
        assert_eq!(found, ticket);
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let store = InMemoryStore::new();
        let ticket = seed(&store, Some(1)).await;
        let handler = GetTicketHandler::new(Arc::new(store));

        let result = handler
            .handle(GetTicketQuery { ticket_id: ticket.id() }, &user(2))
            .await;
        assert_eq!(result, Err(TicketError::Forbidden));
    }

    #[tokio::test]
    async fn unowned_ticket_is_admin_only() {
        let store = InMemoryStore::new();
        let ticket = seed(&store, None).await;
        let handler = GetTicketHandler::new(Arc::new(store));
        let query = GetTicketQuery { ticket_id: ticket.id() };

        assert_eq!(handler.handle(query, &user(1)).await, Err(TicketError::Forbidden));
        assert!(handler.handle(query, &admin(9)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_ticket_is_not_found_even_for_strangers() {
        let handler = GetTicketHandler::new(Arc::new(InMemoryStore::new()));
        let result = handler
            .handle(GetTicketQuery { ticket_id: TicketId::new(404) }, &user(2))
            .await;
        assert_eq!(result, Err(TicketError::NotFound(TicketId::new(404))));
    }
}
