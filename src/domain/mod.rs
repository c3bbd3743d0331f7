//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `decision` - Normalization of model output and answer-or-escalate routing
//! - `ticket` - Support ticket entity and lifecycle
//! - `conversation` - Conversations and their messages
//! - `user` - User accounts

pub mod conversation;
pub mod decision;
pub mod foundation;
pub mod ticket;
pub mod user;
