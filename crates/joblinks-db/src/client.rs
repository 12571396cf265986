//! Connection management.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::DbResult;

/// Connection settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
        }
    }
}

/// Open a connection pool.
pub async fn connect(config: &DbConfig) -> DbResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(max_connections = config.max_connections, "Database connected");
    Ok(db)
}

/// Single-connection in-memory SQLite database with the schema applied.
///
/// Every pooled connection to `sqlite::memory:` would see its own empty
/// database, so the pool is pinned to one connection.
pub async fn connect_in_memory() -> DbResult<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Apply pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> DbResult<()> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Cheap liveness probe used by the readiness endpoint.
pub async fn ping(db: &DatabaseConnection) -> DbResult<()> {
    db.ping().await?;
    Ok(())
}
