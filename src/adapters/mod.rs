//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion providers (OpenAI-compatible HTTP, mock)
//! - `auth` - Argon2 password hashing and JWT access tokens
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx PostgreSQL repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use auth::{Argon2Hasher, JwtTokenService};
pub use memory::InMemoryStore;
pub use postgres::{
    PostgresConversationRepository, PostgresTicketRepository, PostgresUserRepository,
};
