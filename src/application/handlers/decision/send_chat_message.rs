//! SendChatMessageHandler - Conversational variant of answer-or-escalate.
//!
//! Order of work: check the target conversation, call the model, then
//! persist. A failed model call leaves storage untouched.

use std::sync::Arc;

use thiserror::Error;

use super::{DecisionError, DecisionService};
use crate::application::handlers::conversation::load_accessible;
use crate::domain::conversation::{Conversation, ConversationError, NewConversation, NewMessage};
use crate::domain::decision::{DecisionAction, Route};
use crate::domain::foundation::{
    AuthenticatedUser, ConversationId, DomainError, ErrorCode, ValidationError,
};
use crate::domain::ticket::{NewTicket, Ticket};
use crate::ports::{ConversationRepository, TicketRepository};

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub message: String,
    /// Continue this conversation; a new one is started when absent.
    pub conversation_id: Option<ConversationId>,
}

/// Chat reply returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Answered { confidence: f64, reply_text: String },
    Escalated { ticket: Ticket },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub conversation_id: ConversationId,
    pub reply: ChatReply,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error(transparent)]
    Decision(#[from] DecisionError),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::Conversation(e) => e.code(),
            ChatError::Decision(e) => e.code(),
        }
    }
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::Conversation(err.into())
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Conversation(err.into())
    }
}

pub struct SendChatMessageHandler {
    decisions: Arc<DecisionService>,
    conversations: Arc<dyn ConversationRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl SendChatMessageHandler {
    pub fn new(
        decisions: Arc<DecisionService>,
        conversations: Arc<dyn ConversationRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self {
            decisions,
            conversations,
            tickets,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
        actor: &AuthenticatedUser,
    ) -> Result<ChatOutcome, ChatError> {
        let user_message = NewMessage::user(cmd.message.as_str())?;

        let existing = match cmd.conversation_id {
            Some(id) => {
                let conversation = load_accessible(self.conversations.as_ref(), id, actor).await?;
                conversation.ensure_accepts_messages()?;
                Some(conversation)
            }
            None => None,
        };

        let route = self.decisions.route(&cmd.message).await?;

        let mut conversation = match existing {
            Some(conversation) => conversation,
            None => self.start_conversation(actor).await?,
        };

        self.conversations
            .append_message(conversation.id(), &user_message)
            .await?;
        conversation.record_message(true, user_message.content());

        let reply = match route {
            Route::Answer {
                confidence,
                reply_text,
            } => {
                // Nothing to store for an empty reply
                if !reply_text.trim().is_empty() {
                    let assistant = NewMessage::assistant(reply_text.as_str())?
                        .with_decision(confidence, DecisionAction::Answer);
                    self.conversations
                        .append_message(conversation.id(), &assistant)
                        .await?;
                    conversation.record_message(false, assistant.content());
                }
                ChatReply::Answered {
                    confidence,
                    reply_text,
                }
            }
            Route::Escalate { confidence, draft } => {
                let input = NewTicket::escalation(&draft.title, draft.description)?
                    .owned_by(Some(actor.id))
                    .from_conversation(conversation.id());
                let ticket = self.tickets.insert(&input).await?;

                let note = NewMessage::system(format!(
                    "Escalated to support ticket #{}: {}",
                    ticket.id(),
                    ticket.title()
                ))?
                .with_decision(confidence, DecisionAction::Escalate);
                self.conversations
                    .append_message(conversation.id(), &note)
                    .await?;
                conversation.mark_escalated();

                tracing::info!(
                    ticket_id = %ticket.id(),
                    conversation_id = %conversation.id(),
                    "Chat escalated to ticket"
                );
                ChatReply::Escalated { ticket }
            }
        };

        self.conversations.update(&conversation).await?;

        Ok(ChatOutcome {
            conversation_id: conversation.id(),
            reply,
        })
    }

    async fn start_conversation(&self, actor: &AuthenticatedUser) -> Result<Conversation, ChatError> {
        let input = NewConversation::new(None, Some(actor.id))?;
        Ok(self.conversations.insert(&input).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::ticket::test_support::user;
    use crate::domain::conversation::{ConversationStatus, ConversationUpdate, MessageRole};
    use crate::domain::decision::DecisionPolicy;
    use crate::ports::AIError;

    fn handler(store: &InMemoryStore, provider: MockAIProvider) -> SendChatMessageHandler {
        let decisions = Arc::new(DecisionService::new(Arc::new(provider), DecisionPolicy::default()));
        SendChatMessageHandler::new(decisions, Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn cmd(message: &str, conversation_id: Option<ConversationId>) -> SendChatMessageCommand {
        SendChatMessageCommand {
            message: message.to_string(),
            conversation_id,
        }
    }

    #[tokio::test]
    async fn answer_starts_conversation_with_two_messages() {
        let store = InMemoryStore::new();
        let provider = MockAIProvider::new().with_response(
            r#"{"action":"answer","confidence":0.92,"reply_text":"Use the self-service portal."}"#,
        );

        let outcome = handler(&store, provider)
            .handle(cmd("How do I reset my password?", None), &user(1))
            .await
            .unwrap();

        assert!(matches!(outcome.reply, ChatReply::Answered { .. }));
        let messages = store.messages(outcome.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), MessageRole::User);
        assert_eq!(messages[1].role(), MessageRole::Assistant);
        assert_eq!(messages[1].ai_confidence(), Some(0.92));
        assert_eq!(messages[1].ai_action(), Some(DecisionAction::Answer));

        let conversation = ConversationRepository::find_by_id(&store, outcome.conversation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.title(), Some("How do I reset my password?"));
        assert_eq!(conversation.user_id(), Some(user(1).id));
        assert_eq!(store.ticket_count().await, 0);
    }

    #[tokio::test]
    async fn escalation_links_ticket_and_marks_conversation() {
        let store = InMemoryStore::new();
        let provider = MockAIProvider::new().with_response(
            r#"{"action":"escalate","confidence":0.3,"short_title":"Server room flooding"}"#,
        );

        let outcome = handler(&store, provider)
            .handle(cmd("Water on the server room floor", None), &user(1))
            .await
            .unwrap();

        let ChatReply::Escalated { ticket } = outcome.reply else {
            panic!("expected escalation");
        };
        assert_eq!(ticket.conversation_id(), Some(outcome.conversation_id));
        assert_eq!(ticket.user_id(), Some(user(1).id));
        assert_eq!(ticket.description(), Some("Water on the server room floor"));

        let conversation = ConversationRepository::find_by_id(&store, outcome.conversation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.status(), ConversationStatus::Escalated);

        let messages = store.messages(outcome.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role(), MessageRole::System);
        assert!(messages[1].content().contains(&ticket.id().to_string()));
    }

    #[tokio::test]
    async fn upstream_failure_persists_nothing() {
        let store = InMemoryStore::new();
        let provider = MockAIProvider::new().with_error(AIError::rate_limited(10));

        let result = handler(&store, provider)
            .handle(cmd("hello", None), &user(1))
            .await;

        assert!(matches!(result, Err(ChatError::Decision(DecisionError::Provider(_)))));
        assert_eq!(store.conversation_count().await, 0);
        assert_eq!(store.message_count().await, 0);
    }

    #[tokio::test]
    async fn foreign_conversation_is_rejected_before_model_call() {
        let store = InMemoryStore::new();
        let conversation = ConversationRepository::insert(
            &store,
            &NewConversation::new(None, Some(user(1).id)).unwrap(),
        )
        .await
        .unwrap();
        let provider = MockAIProvider::new();

        let result = handler(&store, provider.clone())
            .handle(cmd("hi", Some(conversation.id())), &user(2))
            .await;

        assert_eq!(result, Err(ChatError::Conversation(ConversationError::Forbidden)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn archived_conversation_is_rejected() {
        let store = InMemoryStore::new();
        let mut conversation = ConversationRepository::insert(
            &store,
            &NewConversation::new(None, Some(user(1).id)).unwrap(),
        )
        .await
        .unwrap();
        conversation
            .apply(ConversationUpdate {
                status: Some(ConversationStatus::Archived),
                ..Default::default()
            })
            .unwrap();
        ConversationRepository::update(&store, &conversation).await.unwrap();

        let result = handler(&store, MockAIProvider::new())
            .handle(cmd("hi", Some(conversation.id())), &user(1))
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Conversation(ConversationError::Archived(_)))
        ));
    }

    #[tokio::test]
    async fn continues_existing_conversation() {
        let store = InMemoryStore::new();
        let provider = MockAIProvider::new()
            .with_response(r#"{"action":"answer","confidence":0.9,"reply_text":"First"}"#)
            .with_response(r#"{"action":"answer","confidence":0.9,"reply_text":"Second"}"#);
        let handler = handler(&store, provider);

        let first = handler.handle(cmd("one", None), &user(1)).await.unwrap();
        let second = handler
            .handle(cmd("two", Some(first.conversation_id)), &user(1))
            .await
            .unwrap();

        assert_eq!(first.conversation_id, second.conversation_id);
        assert_eq!(store.conversation_count().await, 1);
        assert_eq!(store.message_count().await, 4);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let store = InMemoryStore::new();
        let result = handler(&store, MockAIProvider::new())
            .handle(cmd("  ", None), &user(1))
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Conversation(ConversationError::Validation(_)))
        ));
    }
}
