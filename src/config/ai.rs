//! Chat-completion provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::domain::decision::DEFAULT_CONFIDENCE_THRESHOLD;

/// Upstream LLM settings and the answer threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Bearer key; calls fail with `NotConfigured` when absent
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Minimum confidence for a direct answer
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f64,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when a non-blank key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Builds the provider settings from this section.
    pub fn provider_config(&self) -> OpenAIConfig {
        OpenAIConfig::new(self.api_key.as_ref().map(|k| k.expose_secret().clone()))
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
    }

    /// Validate AI configuration. A missing key is allowed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            confidence_threshold: default_threshold(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.confidence_threshold, 0.7);
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AiConfig {
            api_key: Some(Secret::new("   ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert!(!config.provider_config().is_configured());
    }

    #[test]
    fn provider_config_carries_settings() {
        let config = AiConfig {
            api_key: Some(Secret::new("gsk_test".to_string())),
            model: "mixtral".to_string(),
            base_url: "http://localhost:9000/v1/".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let provider = config.provider_config();
        assert!(provider.is_configured());
        assert_eq!(provider.model, "mixtral");
        assert_eq!(provider.base_url, "http://localhost:9000/v1");
        assert_eq!(provider.timeout, Duration::from_secs(5));
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        for threshold in [-0.1, 1.5, f64::NAN] {
            let config = AiConfig {
                confidence_threshold: threshold,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidConfidenceThreshold)
            );
        }
    }

    #[test]
    fn non_http_base_url_rejected() {
        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiBaseUrl));
    }
}
