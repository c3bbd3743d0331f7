//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations and coordinates between ports. Write
//! paths take a `*Command`, read paths a `*Query`.

pub mod handlers;

pub use handlers::*;
