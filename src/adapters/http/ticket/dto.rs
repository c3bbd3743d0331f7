//! HTTP DTOs for ticket endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::ticket::{Ticket, TicketStatus, TicketUpdate};
use crate::ports::Pagination;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open a ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial ticket update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
}

impl From<UpdateTicketRequest> for TicketUpdate {
    fn from(req: UpdateTicketRequest) -> Self {
        TicketUpdate {
            title: req.title,
            description: req.description,
            status: req.status,
        }
    }
}

/// Query parameters for listing tickets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTicketsParams {
    /// Case-insensitive substring of title or description
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListTicketsParams {
    pub fn page(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TicketStatus,
    pub user_id: Option<i64>,
    pub conversation_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id().as_i64(),
            title: ticket.title().to_string(),
            description: ticket.description().map(str::to_string),
            status: ticket.status(),
            user_id: ticket.user_id().map(|id| id.as_i64()),
            conversation_id: ticket.conversation_id().map(|id| id.as_i64()),
            created_at: ticket.created_at().to_rfc3339(),
            updated_at: ticket.updated_at().to_rfc3339(),
        }
    }
}
