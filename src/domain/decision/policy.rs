//! Answer-or-escalate routing.

use super::{Decision, DecisionAction};
use crate::domain::foundation::ValidationError;

/// Threshold used when none is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Ticket contents derived from an escalated decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
}

/// Outcome of applying the policy to a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Reply directly; no ticket.
    Answer { confidence: f64, reply_text: String },
    /// Open exactly one ticket from the draft.
    Escalate { confidence: f64, draft: TicketDraft },
}

impl Route {
    /// Action label reported to clients.
    pub fn action(&self) -> DecisionAction {
        match self {
            Route::Answer { .. } => DecisionAction::Answer,
            Route::Escalate { .. } => DecisionAction::Escalate,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Route::Answer { confidence, .. } | Route::Escalate { confidence, .. } => *confidence,
        }
    }
}

/// Confidence gate deciding between direct answers and escalation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    threshold: f64,
}

impl DecisionPolicy {
    /// Creates a policy; the threshold must lie within `0.0..=1.0`.
    pub fn new(threshold: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ValidationError::invalid_format(
                "confidence_threshold",
                format!("must be within 0.0..=1.0, got {}", threshold),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Answer iff the model said "answer" with enough confidence.
    pub fn should_answer(&self, decision: &Decision) -> bool {
        decision.action == DecisionAction::Answer && decision.confidence >= self.threshold
    }

    /// Routes a decision for the given original user message.
    pub fn route(&self, decision: Decision, original_message: &str) -> Route {
        if self.should_answer(&decision) {
            Route::Answer {
                confidence: decision.confidence,
                reply_text: decision.reply_text,
            }
        } else {
            Route::Escalate {
                confidence: decision.confidence,
                draft: TicketDraft {
                    title: decision.short_title,
                    description: original_message.to_string(),
                },
            }
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DEFAULT_SHORT_TITLE;

    fn decision(action: DecisionAction, confidence: f64) -> Decision {
        Decision {
            action,
            confidence,
            short_title: "DB corruption".to_string(),
            reply_text: "Check the power cable.".to_string(),
        }
    }

    #[test]
    fn confident_answer_is_answered() {
        let route = DecisionPolicy::default()
            .route(decision(DecisionAction::Answer, 0.9), "printer won't turn on");

        assert_eq!(
            route,
            Route::Answer {
                confidence: 0.9,
                reply_text: "Check the power cable.".to_string()
            }
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let policy = DecisionPolicy::new(0.7).unwrap();
        assert!(policy.should_answer(&decision(DecisionAction::Answer, 0.7)));
    }

    #[test]
    fn low_confidence_answer_escalates() {
        let route = DecisionPolicy::default()
            .route(decision(DecisionAction::Answer, 0.69), "vpn keeps dropping");

        assert_eq!(route.action(), DecisionAction::Escalate);
        assert_eq!(route.confidence(), 0.69);
    }

    #[test]
    fn escalate_draft_uses_title_and_original_message() {
        let route = DecisionPolicy::default().route(
            decision(DecisionAction::Escalate, 0.4),
            "production database corrupted",
        );

        match route {
            Route::Escalate { draft, .. } => {
                assert_eq!(draft.title, "DB corruption");
                assert_eq!(draft.description, "production database corrupted");
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn escalate_with_full_confidence_still_escalates() {
        let policy = DecisionPolicy::default();
        assert!(!policy.should_answer(&decision(DecisionAction::Escalate, 1.0)));
    }

    #[test]
    fn placeholder_title_flows_into_draft() {
        let mut d = decision(DecisionAction::Escalate, 0.1);
        d.short_title = DEFAULT_SHORT_TITLE.to_string();

        match DecisionPolicy::default().route(d, "help") {
            Route::Escalate { draft, .. } => assert_eq!(draft.title, DEFAULT_SHORT_TITLE),
            other => panic!("expected escalation, got {:?}", other),
        }
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        assert!(DecisionPolicy::new(1.5).is_err());
        assert!(DecisionPolicy::new(-0.1).is_err());
        assert!(DecisionPolicy::new(f64::NAN).is_err());
    }

    #[test]
    fn zero_threshold_answers_any_answer() {
        let policy = DecisionPolicy::new(0.0).unwrap();
        assert!(policy.should_answer(&decision(DecisionAction::Answer, 0.0)));
    }
}
