//! HTTP adapter for the answer-or-escalate endpoints: the assist webhook
//! and conversational chat.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssistRequest, AssistResponse, ChatRequest, ChatResponse};
pub use handlers::AssistHandlers;
pub use routes::{chat_routes, webhook_routes};
