//! DeleteTicketHandler - Admin-only ticket removal.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, TicketId};
use crate::domain::ticket::TicketError;
use crate::ports::TicketRepository;

#[derive(Debug, Clone, Copy)]
pub struct DeleteTicketCommand {
    pub ticket_id: TicketId,
}

pub struct DeleteTicketHandler {
    repository: Arc<dyn TicketRepository>,
}

impl DeleteTicketHandler {
    pub fn new(repository: Arc<dyn TicketRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), TicketError> {
        if !actor.is_admin() {
            return Err(TicketError::Forbidden);
        }

        if !self.repository.delete(cmd.ticket_id).await? {
            return Err(TicketError::not_found(cmd.ticket_id));
        }

        tracing::info!(ticket_id = %cmd.ticket_id, admin_id = %actor.id, "Ticket deleted");
        Ok(())
    }
}
