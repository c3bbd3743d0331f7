//! In-memory repository adapters.
//!
//! `InMemoryStore` implements `TicketRepository`, `ConversationRepository`
//! and `UserRepository` over shared tables.

mod conversation_repository;
mod store;
mod ticket_repository;
mod user_repository;

pub use store::InMemoryStore;
