//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. One handler per use case; each is constructed with the ports it
//! needs and exposes a single `handle` method.

pub mod conversation;
pub mod decision;
pub mod ticket;
pub mod user;

pub use conversation::{
    AppendMessageCommand, AppendMessageHandler, ConversationWithMessages,
    CreateConversationCommand, CreateConversationHandler, DeleteConversationCommand,
    DeleteConversationHandler, GetConversationHandler, GetConversationQuery,
    ListConversationsHandler, ListConversationsQuery, UpdateConversationCommand,
    UpdateConversationHandler,
};
pub use decision::{
    AssistOrTicketCommand, AssistOrTicketHandler, AssistOutcome, ChatError, ChatOutcome,
    ChatReply, DecisionError, DecisionService, SendChatMessageCommand, SendChatMessageHandler,
    SYSTEM_PROMPT,
};
pub use ticket::{
    CreateTicketCommand, CreateTicketHandler, DeleteTicketCommand, DeleteTicketHandler,
    GetTicketHandler, GetTicketQuery, ListTicketsHandler, ListTicketsQuery, UpdateTicketCommand,
    UpdateTicketHandler,
};
pub use user::{
    AuthenticateHandler, LoginCommand, LoginHandler, LoginResult, RegisterUserCommand,
    RegisterUserHandler,
};
