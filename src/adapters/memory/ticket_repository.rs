//! In-memory `TicketRepository`.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, TicketId, Timestamp};
use crate::domain::ticket::{NewTicket, Ticket};
use crate::ports::{TicketFilter, TicketRepository};

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn insert(&self, ticket: &NewTicket) -> Result<Ticket, DomainError> {
        let mut tables = self.tables.write().await;
        let id = TicketId::new(tables.next_id());
        let created = Ticket::create(id, ticket.clone(), Timestamp::now());
        tables.tickets.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, DomainError> {
        Ok(self.tables.read().await.tickets.get(&id).cloned())
    }

    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, DomainError> {
        let tables = self.tables.read().await;
        let query = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty());

        Ok(tables
            .tickets
            .values()
            .filter(|t| filter.owner.map_or(true, |owner| t.user_id() == Some(owner)))
            .filter(|t| filter.status.map_or(true, |status| t.status() == status))
            .filter(|t| query.map_or(true, |q| t.matches_query(q)))
            .skip(filter.page.skip() as usize)
            .take(filter.page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.tickets.get_mut(&ticket.id()) {
            Some(existing) => {
                *existing = ticket.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", ticket.id()),
            )),
        }
    }

    async fn delete(&self, id: TicketId) -> Result<bool, DomainError> {
        Ok(self.tables.write().await.tickets.remove(&id).is_some())
    }
}
