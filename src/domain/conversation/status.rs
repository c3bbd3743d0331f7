//! Conversation lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// Accepting messages.
    #[default]
    Active,
    /// Read-only; new messages are rejected.
    Archived,
    /// Handed over to a support ticket. Still accepts messages.
    Escalated,
}

impl ConversationStatus {
    /// Storage / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::Active => "active",
            ConversationStatus::Archived => "archived",
            ConversationStatus::Escalated => "escalated",
        }
    }

    pub fn accepts_messages(&self) -> bool {
        !matches!(self, ConversationStatus::Archived)
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ConversationStatus::Active),
            "archived" => Ok(ConversationStatus::Archived),
            "escalated" => Ok(ConversationStatus::Escalated),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown conversation status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_archived_rejects_messages() {
        assert!(ConversationStatus::Active.accepts_messages());
        assert!(ConversationStatus::Escalated.accepts_messages());
        assert!(!ConversationStatus::Archived.accepts_messages());
    }

    #[test]
    fn parses_storage_strings() {
        assert_eq!(
            "escalated".parse::<ConversationStatus>().unwrap(),
            ConversationStatus::Escalated
        );
        assert!("closed".parse::<ConversationStatus>().is_err());
    }
}
