//! CreateTicketHandler - Command handler for opening tickets.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::ticket::{NewTicket, Ticket, TicketError};
use crate::ports::TicketRepository;

/// Command to open a ticket owned by the caller.
#[derive(Debug, Clone)]
pub struct CreateTicketCommand {
    pub title: String,
    pub description: Option<String>,
}

/// Handler for creating tickets.
pub struct CreateTicketHandler {
    repository: Arc<dyn TicketRepository>,
}

impl CreateTicketHandler {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Ticket, TicketError> {
        let input = NewTicket::new(&cmd.title, cmd.description)?.owned_by(Some(actor.id));
        let ticket = self.repository.insert(&input).await?;

        tracing::info!(ticket_id = %ticket.id(), user_id = %actor.id, "Ticket created");
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::ticket::test_support::user;
    use crate::domain::ticket::TicketStatus;

    fn handler(store: &InMemoryStore) -> CreateTicketHandler {
        CreateTicketHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn creates_open_ticket_owned_by_caller() {
        let store = InMemoryStore::new();
        let ticket = handler(&store)
            .handle(
                CreateTicketCommand {
                    title: "  VPN drops every hour ".to_string(),
                    description: Some("Since Monday".to_string()),
                },
                &user(3),
            )
            .await
            .unwrap();

        assert_eq!(ticket.title(), "VPN drops every hour");
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert_eq!(ticket.user_id(), Some(user(3).id));
        assert_eq!(store.ticket_count().await, 1);
    }

    #[tokio::test]
    async fn blank_title_is_rejected_without_insert() {
        let store = InMemoryStore::new();
        let result = handler(&store)
            .handle(
                CreateTicketCommand {
                    title: "   ".to_string(),
                    description: None,
                },
                &user(3),
            )
            .await;

        assert!(matches!(result, Err(TicketError::Validation(_))));
        assert_eq!(store.ticket_count().await, 0);
    }
}
