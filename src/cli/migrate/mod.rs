//! Migrate command - applies pending PostgreSQL migrations

use anyhow::Context;
use tracing::info;

use crate::infrastructure::storage::{run_storage_migrations, PostgresMigrator};

/// Apply every pending migration against the configured database
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pool = crate::connect_postgres(&config).await?;

    let applied = run_storage_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let version = PostgresMigrator::new(pool.clone()).current_version().await?;
    info!(applied, version = ?version, "Migrations complete");

    pool.close().await;

    Ok(())
}
