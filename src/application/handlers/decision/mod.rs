//! Answer-or-escalate handlers built on the decision service.

mod assist_or_ticket;
mod decision_service;
mod send_chat_message;

pub use assist_or_ticket::{AssistOrTicketCommand, AssistOrTicketHandler, AssistOutcome};
pub use decision_service::{DecisionError, DecisionService, SYSTEM_PROMPT};
pub use send_chat_message::{ChatError, ChatOutcome, ChatReply, SendChatMessageCommand, SendChatMessageHandler};
