//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges within a
//! conversation. Assistant replies produced by the decision step carry the
//! confidence and action the model reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::decision::DecisionAction;
use crate::domain::foundation::{ConversationId, MessageId, Timestamp, ValidationError};

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// End-user input.
    #[default]
    User,
    /// Automated or agent reply.
    Assistant,
    /// Notices generated by the service (e.g. escalation).
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown message role '{}'", other),
            )),
        }
    }
}

/// Validated input for appending a message.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    role: MessageRole,
    content: String,
    ai_confidence: Option<f64>,
    ai_action: Option<DecisionAction>,
}

impl NewMessage {
    /// Creates a message with non-blank content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    pub fn new(role: MessageRole, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            role,
            content,
            ai_confidence: None,
            ai_action: None,
        })
    }

    pub fn user(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MessageRole::System, content)
    }

    /// Attaches the decision metadata that produced this message.
    pub fn with_decision(mut self, confidence: f64, action: DecisionAction) -> Self {
        self.ai_confidence = Some(confidence);
        self.ai_action = Some(action);
        self
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ai_confidence(&self) -> Option<f64> {
        self.ai_confidence
    }

    pub fn ai_action(&self) -> Option<DecisionAction> {
        self.ai_action
    }
}

/// Persisted message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    role: MessageRole,
    content: String,
    ai_confidence: Option<f64>,
    ai_action: Option<DecisionAction>,
    created_at: Timestamp,
}

impl Message {
    /// Materializes a freshly inserted message.
    pub fn create(
        id: MessageId,
        conversation_id: ConversationId,
        input: NewMessage,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            role: input.role,
            content: input.content,
            ai_confidence: input.ai_confidence,
            ai_action: input.ai_action,
            created_at: now,
        }
    }

    /// Reconstitute a message from persistence.
    pub fn reconstitute(
        id: MessageId,
        conversation_id: ConversationId,
        role: MessageRole,
        content: String,
        ai_confidence: Option<f64>,
        ai_action: Option<DecisionAction>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            role,
            content,
            ai_confidence,
            ai_action,
            created_at,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ai_confidence(&self) -> Option<f64> {
        self.ai_confidence
    }

    pub fn ai_action(&self) -> Option<DecisionAction> {
        self.ai_action
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_rejected() {
        assert_eq!(
            NewMessage::user("  \n "),
            Err(ValidationError::empty_field("content"))
        );
    }

    #[test]
    fn decision_metadata_is_carried_into_message() {
        let input = NewMessage::assistant("Check the power cable.")
            .unwrap()
            .with_decision(0.9, DecisionAction::Answer);
        let msg = Message::create(
            MessageId::new(1),
            ConversationId::new(4),
            input,
            Timestamp::now(),
        );

        assert_eq!(msg.role(), MessageRole::Assistant);
        assert_eq!(msg.ai_confidence(), Some(0.9));
        assert_eq!(msg.ai_action(), Some(DecisionAction::Answer));
        assert_eq!(msg.conversation_id(), ConversationId::new(4));
    }

    #[test]
    fn role_parses_storage_strings() {
        assert_eq!("system".parse::<MessageRole>().unwrap(), MessageRole::System);
        assert!("bot".parse::<MessageRole>().is_err());
    }
}
