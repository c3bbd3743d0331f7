//! Ticket entity.
//!
//! Tickets get their identifier from storage, so creation goes through
//! [`NewTicket`] (validated input) and the repository hands back a
//! [`Ticket`].

use super::TicketStatus;
use crate::domain::foundation::{ConversationId, TicketId, Timestamp, UserId, ValidationError};

/// Maximum length for ticket titles, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
    }
    Ok(trimmed.to_string())
}

/// Validated input for creating a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    title: String,
    description: Option<String>,
    user_id: Option<UserId>,
    conversation_id: Option<ConversationId>,
}

impl NewTicket {
    /// Creates ticket input with a trimmed, length-checked title.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `TooLong` if the title exceeds 200 characters
    pub fn new(
        title: impl AsRef<str>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title.as_ref())?,
            description,
            user_id: None,
            conversation_id: None,
        })
    }

    /// Ticket input for an escalated message. Model-supplied titles over
    /// the limit are cut rather than rejected.
    pub fn escalation(title: &str, description: impl Into<String>) -> Result<Self, ValidationError> {
        let title: String = title.trim().chars().take(MAX_TITLE_LENGTH).collect();
        Self::new(title, Some(description.into()))
    }

    /// Sets the owning user.
    pub fn owned_by(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Links the ticket to the conversation it was escalated from.
    pub fn from_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.conversation_id
    }
}

/// Partial update; `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Persisted support ticket.
///
/// # Invariants
///
/// - `title` is 1-200 characters, non-blank
/// - `updated_at` is never before `created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    title: String,
    description: Option<String>,
    status: TicketStatus,
    user_id: Option<UserId>,
    conversation_id: Option<ConversationId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Ticket {
    /// Materializes a freshly inserted ticket.
    pub fn create(id: TicketId, input: NewTicket, now: Timestamp) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: TicketStatus::Open,
            user_id: input.user_id,
            conversation_id: input.conversation_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a ticket from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TicketId,
        title: String,
        description: Option<String>,
        status: TicketStatus,
        user_id: Option<UserId>,
        conversation_id: Option<ConversationId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            user_id,
            conversation_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// Owning user, if any. Unowned tickets are admin-only.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.conversation_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `TooLong` for an invalid new title; nothing changes
    pub fn apply(&mut self, update: TicketUpdate) -> Result<(), ValidationError> {
        let title = update.title.as_deref().map(validate_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Clears the conversation link after that conversation is deleted.
    pub fn detach_conversation(&mut self) {
        self.conversation_id = None;
    }

    /// Case-insensitive substring match over title and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
