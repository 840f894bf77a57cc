use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{error, info};

use trucv_backend::config::AppConfig;
use trucv_backend::health::check_database;
use trucv_backend::telemetry::init_tracing;

/// Provisions the CV store: connects, applies pending migrations and reports
/// readiness.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting CV store provisioning...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let conn = Database::connect(config.connect_options())
        .await
        .context("Failed to connect to database")?;

    let pending = Migrator::get_pending_migrations(&conn)
        .await
        .context("Failed to read migration state")?;
    info!(pending = pending.len(), "Applying migrations");

    Migrator::up(&conn, None)
        .await
        .context("Failed to apply migrations")?;

    let report = check_database(&conn).await;
    if !report.is_ready() {
        error!(database = report.database, "CV store is not ready");
        anyhow::bail!("database readiness check failed");
    }

    info!("CV store ready");
    Ok(())
}
