//! ListConversationsHandler - Newest-first conversation listing.

use std::sync::Arc;

use crate::domain::conversation::{Conversation, ConversationError, ConversationStatus};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{ConversationFilter, ConversationRepository, Pagination};

#[derive(Debug, Clone, Default)]
pub struct ListConversationsQuery {
    pub status: Option<ConversationStatus>,
    pub page: Pagination,
}

pub struct ListConversationsHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl ListConversationsHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListConversationsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<Conversation>, ConversationError> {
        let filter = ConversationFilter {
            status: query.status,
            owner: if actor.is_admin() { None } else { Some(actor.id) },
            page: query.page,
        };

        Ok(self.repository.list(&filter).await?)
    }
}
