//! Conversation command and query handlers.
//!
//! Same access rules as tickets: owners and admins only, checked after the
//! lookup.

mod append_message;
mod create_conversation;
mod delete_conversation;
mod get_conversation;
mod list_conversations;
mod update_conversation;

pub use append_message::{AppendMessageCommand, AppendMessageHandler};
pub use create_conversation::{CreateConversationCommand, CreateConversationHandler};
pub use delete_conversation::{DeleteConversationCommand, DeleteConversationHandler};
pub use get_conversation::{ConversationWithMessages, GetConversationHandler, GetConversationQuery};
pub use list_conversations::{ListConversationsHandler, ListConversationsQuery};
pub use update_conversation::{UpdateConversationCommand, UpdateConversationHandler};

use crate::domain::conversation::{Conversation, ConversationError};
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::ConversationRepository;

/// Loads a conversation the actor is allowed to see.
pub(crate) async fn load_accessible(
    repository: &dyn ConversationRepository,
    id: ConversationId,
    actor: &AuthenticatedUser,
) -> Result<Conversation, ConversationError> {
    let conversation = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ConversationError::not_found(id))?;

    if !actor.can_access(conversation.user_id()) {
        return Err(ConversationError::Forbidden);
    }

    Ok(conversation)
}
