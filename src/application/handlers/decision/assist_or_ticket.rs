//! AssistOrTicketHandler - Webhook flow: answer directly or open a ticket.

use std::sync::Arc;

use super::{DecisionError, DecisionService};
use crate::domain::decision::Route;
use crate::domain::foundation::UserId;
use crate::domain::ticket::{NewTicket, Ticket};
use crate::ports::TicketRepository;

#[derive(Debug, Clone)]
pub struct AssistOrTicketCommand {
    pub message: String,
    /// Owner of the escalation ticket, when the caller is signed in.
    pub requester: Option<UserId>,
}

/// What happened to the message.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistOutcome {
    Answered { confidence: f64, reply_text: String },
    Escalated { ticket: Ticket },
}

pub struct AssistOrTicketHandler {
    decisions: Arc<DecisionService>,
    tickets: Arc<dyn TicketRepository>,
}

impl AssistOrTicketHandler {
    pub fn new(decisions: Arc<DecisionService>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { decisions, tickets }
    }

    /// Opens exactly one ticket on escalation and none otherwise. Upstream
    /// failures return before anything is written.
    pub async fn handle(&self, cmd: AssistOrTicketCommand) -> Result<AssistOutcome, DecisionError> {
        match self.decisions.route(&cmd.message).await? {
            Route::Answer {
                confidence,
                reply_text,
            } => Ok(AssistOutcome::Answered {
                confidence,
                reply_text,
            }),
            Route::Escalate { draft, .. } => {
                let input = NewTicket::escalation(&draft.title, draft.description)?
                    .owned_by(cmd.requester);
                let ticket = self.tickets.insert(&input).await?;

                tracing::info!(ticket_id = %ticket.id(), title = %ticket.title(), "Ticket opened from escalation");
                Ok(AssistOutcome::Escalated { ticket })
            }
        }
    }
}
