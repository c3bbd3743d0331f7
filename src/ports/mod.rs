//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `TicketRepository` - Support tickets
//! - `ConversationRepository` - Conversations and their messages
//! - `UserRepository` - User accounts
//!
//! ## External services
//!
//! - `AIProvider` - Chat-completion API used for classification
//!
//! ## Credentials
//!
//! - `PasswordHasher` - One-way password hashing
//! - `TokenService` - Bearer token issuance and verification

mod ai_provider;
mod conversation_repository;
mod credentials;
mod pagination;
mod ticket_repository;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo, TokenUsage,
};
pub use conversation_repository::{ConversationFilter, ConversationRepository};
pub use credentials::{IssuedToken, PasswordHasher, TokenService};
pub use pagination::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};
pub use ticket_repository::{TicketFilter, TicketRepository};
pub use user_repository::UserRepository;
