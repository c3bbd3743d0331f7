//! HTTP adapter for conversation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AppendMessageRequest, ConversationDetailResponse, ConversationResponse,
    CreateConversationRequest, ListConversationsParams, MessageResponse,
    UpdateConversationRequest,
};
pub use handlers::ConversationHandlers;
pub use routes::conversation_routes;
