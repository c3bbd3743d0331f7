//! Shared in-memory tables.
//!
//! All repositories share one lock so that cross-table effects (message
//! cascade, ticket unlinking) are atomic, like the SQL schema.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, TicketId, UserId};
use crate::domain::ticket::Ticket;
use crate::domain::user::User;

#[derive(Debug, Default)]
pub(super) struct Tables {
    sequence: i64,
    pub(super) tickets: BTreeMap<TicketId, Ticket>,
    pub(super) conversations: BTreeMap<ConversationId, Conversation>,
    /// Insertion order equals (created_at, id) order.
    pub(super) messages: Vec<Message>,
    pub(super) users: BTreeMap<UserId, User>,
}

impl Tables {
    /// Next identifier. One sequence for all tables keeps ids distinct.
    pub(super) fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
}

/// In-memory implementation of every repository port.
///
/// Useful for tests and local development without PostgreSQL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub(super) tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ticket_count(&self) -> usize {
        self.tables.read().await.tickets.len()
    }

    pub async fn conversation_count(&self) -> usize {
        self.tables.read().await.conversations.len()
    }

    pub async fn message_count(&self) -> usize {
        self.tables.read().await.messages.len()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}
