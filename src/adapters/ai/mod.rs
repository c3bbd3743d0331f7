//! AI Provider Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - Any OpenAI-compatible chat-completion endpoint (Groq by default)
//! - `MockAIProvider` - Queued responses for tests

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse, FALLBACK_RESPONSE};
pub use openai_provider::{
    OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
