//! Ticket repository port.

use async_trait::async_trait;

use super::Pagination;
use crate::domain::foundation::{DomainError, TicketId, UserId};
use crate::domain::ticket::{NewTicket, Ticket, TicketStatus};

/// Criteria for listing tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Case-insensitive substring matched against title OR description.
    pub query: Option<String>,
    pub status: Option<TicketStatus>,
    /// Restricts results to one owner. `None` means all tickets.
    pub owner: Option<UserId>,
    pub page: Pagination,
}

/// Repository port for ticket persistence.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new ticket with status `open`; storage assigns the id.
    async fn insert(&self, ticket: &NewTicket) -> Result<Ticket, DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, DomainError>;

    /// Tickets matching the filter, ordered by id ascending.
    async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, DomainError>;

    /// Persist title, description, status and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket doesn't exist
    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError>;

    /// Delete a ticket. Returns `false` if it did not exist.
    async fn delete(&self, id: TicketId) -> Result<bool, DomainError>;
}
