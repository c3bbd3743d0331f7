//! Conversation entity.
//!
//! A conversation groups ordered messages. Its title is optional and is
//! filled in from the first user message when nobody set one.

use super::{ConversationError, ConversationStatus};
use crate::domain::foundation::{ConversationId, Timestamp, UserId, ValidationError};

/// Maximum length for an explicit conversation title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a title derived from message content.
pub const DERIVED_TITLE_LENGTH: usize = 50;

const ELLIPSIS: &str = "...";

/// Derives a short title from message content.
///
/// Uses the first non-blank line. Lines longer than 50 characters are cut on
/// a character boundary and end in `...`, keeping the total at 50.
pub fn derive_title(content: &str) -> String {
    let first_line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    if first_line.chars().count() <= DERIVED_TITLE_LENGTH {
        return first_line.to_string();
    }

    let keep = DERIVED_TITLE_LENGTH - ELLIPSIS.len();
    let mut title: String = first_line.chars().take(keep).collect();
    title.truncate(title.trim_end().len());
    title.push_str(ELLIPSIS);
    title
}

fn normalize_title(title: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(title) = title else {
        return Ok(None);
    };
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
    }
    Ok(Some(trimmed.to_string()))
}

/// Validated input for creating a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    title: Option<String>,
    user_id: Option<UserId>,
}

impl NewConversation {
    /// Blank titles are treated as absent.
    ///
    /// # Errors
    ///
    /// - `TooLong` if the title exceeds 200 characters
    pub fn new(title: Option<String>, user_id: Option<UserId>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_title(title)?,
            user_id,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}

/// Partial update; `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationUpdate {
    pub title: Option<String>,
    pub status: Option<ConversationStatus>,
}

/// Persisted conversation header (messages are loaded separately).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    title: Option<String>,
    status: ConversationStatus,
    user_id: Option<UserId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Conversation {
    /// Materializes a freshly inserted conversation.
    pub fn create(id: ConversationId, input: NewConversation, now: Timestamp) -> Self {
        Self {
            id,
            title: input.title,
            status: ConversationStatus::Active,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a conversation from persistence.
    pub fn reconstitute(
        id: ConversationId,
        title: Option<String>,
        status: ConversationStatus,
        user_id: Option<UserId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            status,
            user_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// Owning user, if any. Unowned conversations are admin-only.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
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
    pub fn apply(&mut self, update: ConversationUpdate) -> Result<(), ValidationError> {
        if update.title.is_some() {
            self.title = normalize_title(update.title)?;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.touch();
        Ok(())
    }

    /// Fails when the conversation no longer accepts messages.
    pub fn ensure_accepts_messages(&self) -> Result<(), ConversationError> {
        if self.status.accepts_messages() {
            Ok(())
        } else {
            Err(ConversationError::Archived(self.id))
        }
    }

    /// Records a new message: derives the title from the first user
    /// message when none is set, and refreshes `updated_at`.
    pub fn record_message(&mut self, is_user: bool, content: &str) {
        if is_user && self.title.is_none() {
            let derived = derive_title(content);
            if !derived.is_empty() {
                self.title = Some(derived);
            }
        }
        self.touch();
    }

    /// Marks the conversation as handed over to a ticket.
    pub fn mark_escalated(&mut self) {
        self.status = ConversationStatus::Escalated;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
