//! Conversation domain module.
//!
//! Conversations thread user messages, assistant replies and system notices.
//! A conversation ends up `escalated` once a ticket has been opened from it.

mod aggregate;
mod errors;
mod message;
mod status;

pub use aggregate::{
    derive_title, Conversation, ConversationUpdate, NewConversation, DERIVED_TITLE_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use errors::ConversationError;
pub use message::{Message, MessageRole, NewMessage};
pub use status::ConversationStatus;
