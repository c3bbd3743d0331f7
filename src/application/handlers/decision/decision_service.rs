//! DecisionService - Asks the model to classify a message and normalizes
//! the reply into a routed decision.
//!
//! A single upstream call per message. Transport failures and unreadable
//! replies both surface as `DecisionError`; neither is ever turned into an
//! implicit escalation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::decision::{parse_decision, Decision, DecisionParseError, DecisionPolicy, Route};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Instructions sent ahead of every classified message.
pub const SYSTEM_PROMPT: &str = r#"You are Helpdesk-AI. Reply only in JSON matching: {"action":"answer|escalate","confidence":number,"short_title":string,"reply_text":string}

For common IT issues (password resets, basic troubleshooting, software questions), provide helpful answers with high confidence (0.8-1.0).
For complex, specific, or unclear issues, choose "escalate" with a descriptive short_title for the ticket."#;

/// Failures of the classify-and-route step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("Unreadable AI decision: {0}")]
    Unparseable(#[from] DecisionParseError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl DecisionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::Validation(_) => ErrorCode::ValidationFailed,
            DecisionError::Provider(_) | DecisionError::Unparseable(_) => {
                ErrorCode::AIProviderError
            }
            DecisionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for DecisionError {
    fn from(err: DomainError) -> Self {
        DecisionError::Infrastructure(err.to_string())
    }
}

/// Classifies messages through the configured provider.
pub struct DecisionService {
    provider: Arc<dyn AIProvider>,
    policy: DecisionPolicy,
}

impl DecisionService {
    pub fn new(provider: Arc<dyn AIProvider>, policy: DecisionPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }

    /// Returns the normalized decision for `message`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the message is blank
    /// - `Provider` for transport, status or envelope failures
    /// - `Unparseable` if the reply holds no usable JSON object
    pub async fn decide(&self, message: &str) -> Result<Decision, DecisionError> {
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let request = CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, message)
            .with_temperature(0.0)
            .with_json_mode();

        let response = self.provider.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, provider = %self.provider.provider_info().name, "AI provider call failed");
            e
        })?;

        let decision = parse_decision(&response.content).map_err(|e| {
            tracing::error!(error = %e, model = %response.model, "AI reply could not be parsed");
            e
        })?;

        tracing::debug!(
            action = %decision.action,
            confidence = decision.confidence,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Decision received"
        );
        Ok(decision)
    }

    /// Classifies `message` and applies the confidence policy.
    pub async fn route(&self, message: &str) -> Result<Route, DecisionError> {
        let decision = self.decide(message).await?;
        let route = self.policy.route(decision, message);

        tracing::info!(
            routed = %route.action(),
            confidence = route.confidence(),
            threshold = self.policy.threshold(),
            "Decision routed"
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::decision::{DecisionAction, DEFAULT_SHORT_TITLE};

    fn service(provider: MockAIProvider) -> DecisionService {
        DecisionService::new(Arc::new(provider), DecisionPolicy::default())
    }

    #[tokio::test]
    async fn sends_fixed_prompt_in_json_mode() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"action":"answer","confidence":0.9,"reply_text":"ok"}"#);
        service(provider.clone()).decide("reset my password").await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(calls[0].temperature, Some(0.0));
        assert!(calls[0].json_mode);
        assert_eq!(calls[0].messages[0].content, "reset my password");
    }

    #[tokio::test]
    async fn fenced_reply_is_normalized() {
        let provider = MockAIProvider::new().with_response(
            "```json\n{\"action\":\" ANSWER \",\"confidence\":0.95,\"reply_text\":\"Hold the power button.\"}\n```",
        );
        let decision = service(provider).decide("laptop frozen").await.unwrap();

        assert_eq!(decision.action, DecisionAction::Answer);
        assert_eq!(decision.reply_text, "Hold the power button.");
        assert_eq!(decision.short_title, DEFAULT_SHORT_TITLE);
    }

    #[tokio::test]
    async fn blank_message_never_reaches_provider() {
        let provider = MockAIProvider::new();
        let result = service(provider.clone()).decide("   ").await;

        assert!(matches!(result, Err(DecisionError::Validation(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_an_error_not_an_escalation() {
        let provider = MockAIProvider::new().with_error(AIError::unavailable("502 from upstream"));
        let result = service(provider).route("anything").await;

        let err = result.unwrap_err();
        assert!(matches!(err, DecisionError::Provider(_)));
        assert_eq!(err.code(), ErrorCode::AIProviderError);
    }

    #[tokio::test]
    async fn prose_reply_is_unparseable() {
        let provider = MockAIProvider::new().with_response("I think you should reboot.");
        let result = service(provider).route("anything").await;

        assert_eq!(
            result.unwrap_err(),
            DecisionError::Unparseable(DecisionParseError::NoJsonObject)
        );
    }

    #[tokio::test]
    async fn low_confidence_answer_is_routed_to_escalation() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"action":"answer","confidence":0.5,"short_title":"VPN"}"#);
        let route = service(provider).route("vpn flaky").await.unwrap();

        match route {
            Route::Escalate { draft, confidence } => {
                assert_eq!(confidence, 0.5);
                assert_eq!(draft.title, "VPN");
                assert_eq!(draft.description, "vpn flaky");
            }
            other => panic!("expected escalation, got {:?}", other),
        }
    }
}
