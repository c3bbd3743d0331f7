//! The Decision value produced by the classification step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Ticket title used when the model gives no usable `short_title`.
pub const DEFAULT_SHORT_TITLE: &str = "Support Issue";

/// What the model recommends doing with an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Reply directly with `reply_text`.
    Answer,
    /// Open a support ticket.
    Escalate,
}

impl DecisionAction {
    /// Interprets a model-supplied label. Anything but "answer" escalates.
    pub fn from_label(label: &str) -> Self {
        if label.trim().to_lowercase() == "answer" {
            DecisionAction::Answer
        } else {
            DecisionAction::Escalate
        }
    }

    /// Storage / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Answer => "answer",
            DecisionAction::Escalate => "escalate",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured classification of a single message.
///
/// Never persisted; rebuilt for every request from the model output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub action: DecisionAction,
    /// Always within `0.0..=1.0`.
    pub confidence: f64,
    pub short_title: String,
    pub reply_text: String,
}

impl Decision {
    /// Builds a decision from a decoded JSON object, coercing every field.
    ///
    /// Missing or wrongly-typed fields fall back to defaults; this never fails.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let action = match payload.get("action") {
            Some(Value::String(label)) => DecisionAction::from_label(label),
            _ => DecisionAction::Escalate,
        };

        let confidence = payload
            .get("confidence")
            .and_then(Value::as_f64)
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        let reply_text = payload
            .get("reply_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let short_title = payload
            .get("short_title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_SHORT_TITLE)
            .to_string();

        Self {
            action,
            confidence,
            short_title,
            reply_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn well_formed_payload_is_taken_verbatim() {
        let decision = Decision::from_payload(&payload(json!({
            "action": "answer",
            "confidence": 0.9,
            "short_title": "Printer power",
            "reply_text": "Check the power cable."
        })));

        assert_eq!(decision.action, DecisionAction::Answer);
        assert_eq!(decision.confidence, 0.9);
        assert_eq!(decision.short_title, "Printer power");
        assert_eq!(decision.reply_text, "Check the power cable.");
    }

    #[test]
    fn action_is_case_insensitive() {
        let decision = Decision::from_payload(&payload(json!({"action": "ANSWER"})));
        assert_eq!(decision.action, DecisionAction::Answer);
    }

    #[test]
    fn unknown_action_label_escalates() {
        let decision = Decision::from_payload(&payload(json!({"action": "reply"})));
        assert_eq!(decision.action, DecisionAction::Escalate);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let decision = Decision::from_payload(&payload(json!({"unrelated": true})));
        assert_eq!(decision.action, DecisionAction::Escalate);
        assert_eq!(decision.confidence, 0.0);
        assert_eq!(decision.short_title, DEFAULT_SHORT_TITLE);
        assert_eq!(decision.reply_text, "");
    }

    #[test]
    fn wrong_types_get_defaults() {
        let decision = Decision::from_payload(&payload(json!({
            "action": 1,
            "confidence": "high",
            "short_title": ["x"],
            "reply_text": null
        })));
        assert_eq!(decision.action, DecisionAction::Escalate);
        assert_eq!(decision.confidence, 0.0);
        assert_eq!(decision.short_title, DEFAULT_SHORT_TITLE);
        assert_eq!(decision.reply_text, "");
    }

    #[test]
    fn boolean_confidence_is_not_numeric() {
        let decision = Decision::from_payload(&payload(json!({"confidence": true})));
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn integer_confidence_is_accepted() {
        let decision = Decision::from_payload(&payload(json!({"confidence": 1})));
        assert_eq!(decision.confidence, 1.0);
    }

    #[test]
    fn confidence_is_clamped() {
        let high = Decision::from_payload(&payload(json!({"confidence": 7.5})));
        let low = Decision::from_payload(&payload(json!({"confidence": -2})));
        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn blank_title_gets_placeholder() {
        let decision = Decision::from_payload(&payload(json!({"short_title": "   "})));
        assert_eq!(decision.short_title, DEFAULT_SHORT_TITLE);
    }

    #[test]
    fn title_is_trimmed() {
        let decision = Decision::from_payload(&payload(json!({"short_title": "  DB corruption "})));
        assert_eq!(decision.short_title, "DB corruption");
    }
}
