//! Shared application state, built once at startup.

use std::sync::Arc;

use crate::application::handlers::{
    AppendMessageHandler, AssistOrTicketHandler, AuthenticateHandler, CreateConversationHandler,
    CreateTicketHandler, DecisionService, DeleteConversationHandler, DeleteTicketHandler,
    GetConversationHandler, GetTicketHandler, ListConversationsHandler, ListTicketsHandler,
    LoginHandler, RegisterUserHandler, SendChatMessageHandler, UpdateConversationHandler,
    UpdateTicketHandler,
};
use crate::domain::decision::DecisionPolicy;
use crate::ports::{
    AIProvider, ConversationRepository, PasswordHasher, TicketRepository, TokenService,
    UserRepository,
};

use super::assist::AssistHandlers;
use super::auth::AuthHandlers;
use super::conversation::ConversationHandlers;
use super::ticket::TicketHandlers;

/// Port implementations and policy values the router is built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub tickets: Arc<dyn TicketRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub policy: DecisionPolicy,
    pub cookie_secure: bool,
}

/// Per-module handler bundles. Immutable after construction.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<AuthenticateHandler>,
    pub auth: AuthHandlers,
    pub tickets: TicketHandlers,
    pub conversations: ConversationHandlers,
    pub assist: AssistHandlers,
}

impl AppState {
    pub fn new(deps: AppDependencies) -> Self {
        let decisions = Arc::new(DecisionService::new(deps.ai_provider.clone(), deps.policy));

        let tickets = TicketHandlers::new(
            Arc::new(CreateTicketHandler::new(deps.tickets.clone())),
            Arc::new(GetTicketHandler::new(deps.tickets.clone())),
            Arc::new(ListTicketsHandler::new(deps.tickets.clone())),
            Arc::new(UpdateTicketHandler::new(deps.tickets.clone())),
            Arc::new(DeleteTicketHandler::new(deps.tickets.clone())),
        );

        let conversations = ConversationHandlers::new(
            Arc::new(CreateConversationHandler::new(deps.conversations.clone())),
            Arc::new(GetConversationHandler::new(deps.conversations.clone())),
            Arc::new(ListConversationsHandler::new(deps.conversations.clone())),
            Arc::new(UpdateConversationHandler::new(deps.conversations.clone())),
            Arc::new(DeleteConversationHandler::new(deps.conversations.clone())),
            Arc::new(AppendMessageHandler::new(deps.conversations.clone())),
        );

        let auth = AuthHandlers::new(
            Arc::new(RegisterUserHandler::new(
                deps.users.clone(),
                deps.hasher.clone(),
            )),
            Arc::new(LoginHandler::new(
                deps.users.clone(),
                deps.hasher.clone(),
                deps.tokens.clone(),
            )),
            deps.cookie_secure,
            deps.tokens.lifetime_secs(),
        );

        let assist = AssistHandlers::new(
            Arc::new(AssistOrTicketHandler::new(
                decisions.clone(),
                deps.tickets.clone(),
            )),
            Arc::new(SendChatMessageHandler::new(
                decisions,
                deps.conversations.clone(),
                deps.tickets.clone(),
            )),
        );

        Self {
            authenticator: Arc::new(AuthenticateHandler::new(deps.users, deps.tokens)),
            auth,
            tickets,
            conversations,
            assist,
        }
    }
}
