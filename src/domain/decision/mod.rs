//! Decision module - classification of incoming messages.
//!
//! Turns free-text model output into a typed [`Decision`] and routes it
//! to either a direct answer or a ticket escalation.

mod decision;
mod normalize;
mod policy;

pub use decision::{Decision, DecisionAction, DEFAULT_SHORT_TITLE};
pub use normalize::{parse_decision, strip_code_fences, DecisionParseError};
pub use policy::{DecisionPolicy, Route, TicketDraft, DEFAULT_CONFIDENCE_THRESHOLD};
