//! Helpdesk-AI API server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use helpdesk_ai::adapters::http::{app_router, AppDependencies, AppState};
use helpdesk_ai::adapters::{
    postgres, Argon2Hasher, JwtTokenService, OpenAIProvider, PostgresConversationRepository,
    PostgresTicketRepository, PostgresUserRepository,
};
use helpdesk_ai::config::AppConfig;
use helpdesk_ai::domain::decision::DecisionPolicy;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_filter()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    init_tracing(&config);

    let pool = postgres::connect(&config.database)
        .await
        .context("connecting to database")?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool)
            .await
            .context("running migrations")?;
        tracing::info!("Database migrations applied");
    }

    if !config.ai.has_api_key() {
        tracing::warn!("No AI API key configured; decision endpoints will return 502");
    }

    let tokens = JwtTokenService::new(
        &config.auth.secret_key,
        config.auth.jwt_algorithm()?,
        config.auth.access_token_expire_hours,
    )?;
    let ai_provider = OpenAIProvider::new(config.ai.provider_config())?;
    let policy = DecisionPolicy::new(config.ai.confidence_threshold)?;

    let state = AppState::new(AppDependencies {
        tickets: Arc::new(PostgresTicketRepository::new(pool.clone())),
        conversations: Arc::new(PostgresConversationRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool)),
        hasher: Arc::new(Argon2Hasher::new()),
        tokens: Arc::new(tokens),
        ai_provider: Arc::new(ai_provider),
        policy,
        cookie_secure: config.auth.cookie_secure,
    });

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(
        app = %config.server.app_name,
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        threshold = config.ai.confidence_threshold,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}
