//! Helpdesk-AI - support desk backend with LLM-assisted triage.
//!
//! Incoming questions are classified by a chat-completion model and either
//! answered directly or escalated into a support ticket. Around that sit
//! user accounts, ticket management and threaded conversations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
