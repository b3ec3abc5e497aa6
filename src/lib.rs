//! Dux Teams API
//!
//! A small REST service for football team records:
//! - CRUD and case-insensitive name search over teams
//! - Unique team names, ignoring case
//! - Token login guarding the team routes
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::{AppState, AuthServiceTrait, TeamServiceTrait};
use config::StorageBackend;
use infrastructure::{
    auth::{AuthService, JwtConfig, JwtGenerator, JwtService, StaticCredentialVerifier},
    storage::{run_storage_migrations, PostgresConfig},
    team::{InMemoryTeamRepository, PostgresTeamRepository, TeamService},
};
use tracing::{info, warn};

const PLACEHOLDER_SECRET: &str = "change-me-in-production";

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(backend = ?config.storage.backend, "Initializing team store");

    let team_service: Arc<dyn TeamServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => {
            Arc::new(TeamService::new(Arc::new(InMemoryTeamRepository::new())))
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(config).await?;

            let applied = run_storage_migrations(&pool)
                .await
                .context("Failed to apply migrations")?;
            info!(applied, "Storage migrations up to date");

            Arc::new(TeamService::new(Arc::new(PostgresTeamRepository::new(pool))))
        }
    };

    let jwt_service = create_jwt_service(config);
    let verifier = Arc::new(StaticCredentialVerifier::new(
        config.auth.username.clone(),
        config.auth.password.clone(),
    ));
    let auth_service: Arc<dyn AuthServiceTrait> =
        Arc::new(AuthService::new(verifier, jwt_service.clone()));

    if !config.auth.require_token {
        warn!("Token guard disabled: /teams is open to anonymous callers");
    }

    Ok(AppState {
        team_service,
        auth_service,
        jwt_service,
        require_token: config.auth.require_token,
    })
}

/// Open a pool for the configured database URL
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = config.storage.database_url().context(
        "PostgreSQL storage selected but neither storage.database_url nor DATABASE_URL is set",
    )?;

    let pool = PostgresConfig::new(url)
        .with_max_connections(config.storage.max_connections)
        .with_min_connections(config.storage.min_connections)
        .with_connect_timeout(config.storage.connect_timeout_secs)
        .with_idle_timeout(config.storage.idle_timeout_secs)
        .connect()
        .await?;

    Ok(pool)
}

/// Create JWT service from the configured secret, or `JWT_SECRET`
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let mut secret = config.auth.jwt_secret.clone();

    if secret == PLACEHOLDER_SECRET {
        match std::env::var("JWT_SECRET") {
            Ok(from_env) if !from_env.is_empty() => secret = from_env,
            _ => warn!("Using the placeholder JWT secret. Set auth.jwt_secret or JWT_SECRET."),
        }
    }

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_issuer.clone(),
        config.auth.expiration_hours,
    )))
}
