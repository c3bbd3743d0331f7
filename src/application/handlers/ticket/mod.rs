//! Ticket command and query handlers.
//!
//! Regular users only see and mutate their own tickets; admins see all.
//! Ownership is checked after the lookup so missing tickets are 404s.

mod create_ticket;
mod delete_ticket;
mod get_ticket;
mod list_tickets;
mod update_ticket;

pub use create_ticket::{CreateTicketCommand, CreateTicketHandler};
pub use delete_ticket::{DeleteTicketCommand, DeleteTicketHandler};
pub use get_ticket::{GetTicketHandler, GetTicketQuery};
pub use list_tickets::{ListTicketsHandler, ListTicketsQuery};
pub use update_ticket::{UpdateTicketCommand, UpdateTicketHandler};

use crate::domain::foundation::{AuthenticatedUser, TicketId};
use crate::domain::ticket::{Ticket, TicketError};
use crate::ports::TicketRepository;

/// Loads a ticket the actor is allowed to see.
async fn load_accessible(
    repository: &dyn TicketRepository,
    id: TicketId,
    actor: &AuthenticatedUser,
) -> Result<Ticket, TicketError> {
    let ticket = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| TicketError::not_found(id))?;

    if !actor.can_access(ticket.user_id()) {
        return Err(TicketError::Forbidden);
    }

    Ok(ticket)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::foundation::{AuthenticatedUser, Role, UserId};

    pub fn user(id: i64) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(id), format!("user{}", id), "user@example.com", Role::User)
    }

    pub fn admin(id: i64) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(id), "admin", "admin@example.com", Role::Admin)
    }
}
