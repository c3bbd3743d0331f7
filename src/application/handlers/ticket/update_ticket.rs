//! UpdateTicketHandler - Command handler for partial ticket updates.

use std::sync::Arc;

use super::load_accessible;
use crate::domain::foundation::{AuthenticatedUser, TicketId};
use crate::domain::ticket::{Ticket, TicketError, TicketUpdate};
use crate::ports::TicketRepository;

#[derive(Debug, Clone)]
pub struct UpdateTicketCommand {
    pub ticket_id: TicketId,
    pub update: TicketUpdate,
}

pub struct UpdateTicketHandler {
    repository: Arc<dyn TicketRepository>,
}

impl UpdateTicketHandler {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Ticket, TicketError> {
        let mut ticket = load_accessible(self.repository.as_ref(), cmd.ticket_id, actor).await?;

        ticket.apply(cmd.update)?;
        self.repository.update(&ticket).await?;

        tracing::debug!(ticket_id = %ticket.id(), status = %ticket.status(), "Ticket updated");
        Ok(ticket)
    }
}
