//! Ticket domain module.
//!
//! Support tickets are opened by users directly or created by escalation
//! when a message cannot be answered automatically.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{NewTicket, Ticket, TicketUpdate, MAX_TITLE_LENGTH};
pub use errors::TicketError;
pub use status::TicketStatus;
