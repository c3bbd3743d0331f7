//! HTTP DTOs for the answer-or-escalate endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{AssistOutcome, ChatOutcome, ChatReply};
use crate::domain::ticket::{Ticket, TicketStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct AssistRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Continue an existing conversation
    #[serde(default)]
    pub conversation_id: Option<i64>,
}

/// Routed result, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AssistResponse {
    Answer {
        confidence: f64,
        reply_text: String,
    },
    Escalate {
        ticket_id: i64,
        status: TicketStatus,
    },
}

impl AssistResponse {
    fn escalated(ticket: &Ticket) -> Self {
        AssistResponse::Escalate {
            ticket_id: ticket.id().as_i64(),
            status: ticket.status(),
        }
    }
}

impl From<AssistOutcome> for AssistResponse {
    fn from(outcome: AssistOutcome) -> Self {
        match outcome {
            AssistOutcome::Answered {
                confidence,
                reply_text,
            } => AssistResponse::Answer {
                confidence,
                reply_text,
            },
            AssistOutcome::Escalated { ticket } => AssistResponse::escalated(&ticket),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub conversation_id: i64,
    #[serde(flatten)]
    pub reply: AssistResponse,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        let reply = match outcome.reply {
            ChatReply::Answered {
                confidence,
                reply_text,
            } => AssistResponse::Answer {
                confidence,
                reply_text,
            },
            ChatReply::Escalated { ticket } => AssistResponse::escalated(&ticket),
        };
        Self {
            conversation_id: outcome.conversation_id.as_i64(),
            reply,
        }
    }
}
