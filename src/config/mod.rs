//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `HELPDESK` prefix and
//! nested values are separated with a double underscore.
//!
//! # Example
//!
//! ```no_run
//! use helpdesk_ai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::{AuthConfig, MAX_TOKEN_LIFETIME_HOURS, MIN_PRODUCTION_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` when present, then `HELPDESK__*` variables:
    ///
    /// - `HELPDESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HELPDESK__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HELPDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(self.server.environment)?;
        self.ai.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "HELPDESK__DATABASE__URL",
        "HELPDESK__AUTH__SECRET_KEY",
        "HELPDESK__SERVER__PORT",
        "HELPDESK__SERVER__ENVIRONMENT",
        "HELPDESK__AI__CONFIDENCE_THRESHOLD",
        "HELPDESK__AI__API_KEY",
    ];

    fn set_minimal_env() {
        env::set_var("HELPDESK__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("HELPDESK__AUTH__SECRET_KEY", "dev-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn loads_minimal_environment() {
        let config = load_with(&[]).expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ai.confidence_threshold, 0.7);
        assert!(!config.ai.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_apply() {
        let config = load_with(&[
            ("HELPDESK__SERVER__PORT", "3000"),
            ("HELPDESK__AI__CONFIDENCE_THRESHOLD", "0.85"),
            ("HELPDESK__AI__API_KEY", "gsk_test"),
        ])
        .expect("config should load");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.confidence_threshold, 0.85);
        assert!(config.ai.has_api_key());
    }

    #[test]
    fn production_requires_long_secret() {
        let config = load_with(&[("HELPDESK__SERVER__ENVIRONMENT", "production")])
            .expect("config should load");
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::SecretKeyTooShort(MIN_PRODUCTION_SECRET_BYTES))
        );
    }
}
