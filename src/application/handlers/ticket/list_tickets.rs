//! ListTicketsHandler - Query handler for filtered ticket listings.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::ticket::{Ticket, TicketError, TicketStatus};
use crate::ports::{Pagination, TicketFilter, TicketRepository};

/// Listing query. `q` matches title or description case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ListTicketsQuery {
    pub q: Option<String>,
    pub status: Option<TicketStatus>,
    pub page: Pagination,
}

pub struct ListTicketsHandler {
    repository: Arc<dyn TicketRepository>,
}

impl ListTicketsHandler {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    /// Admins list everything; other users only their own tickets.
    pub async fn handle(
        &self,
        query: ListTicketsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<Ticket>, TicketError> {
        let filter = TicketFilter {
            query: query.q.filter(|q| !q.trim().is_empty()),
            status: query.status,
            owner: if actor.is_admin() { None } else { Some(actor.id) },
            page: query.page,
        };

        Ok(self.repository.list(&filter).await?)
    }
}
