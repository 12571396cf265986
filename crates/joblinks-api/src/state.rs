//! Application state.

use std::sync::Arc;

use joblinks_db::{DatabaseConnection, DbConfig, Repositories};

use crate::auth::{PasswordHasher, TokenService};
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub db: DatabaseConnection,
    pub repos: Repositories,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Connect to the database (applying migrations if configured) and build state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let db_config = DbConfig {
            url: config.database_url.clone(),
            max_connections: config.database_max_connections,
        };
        let db = joblinks_db::connect(&db_config).await?;
        if config.run_migrations {
            joblinks_db::migrate(&db).await?;
        }
        Ok(Self::with_database(config, db, PasswordHasher::new()?))
    }

    /// Build state over an existing connection.
    pub fn with_database(config: ApiConfig, db: DatabaseConnection, hasher: PasswordHasher) -> Self {
        Self {
            tokens: TokenService::new(&config.jwt),
            repos: Repositories::new(db.clone()),
            config: Arc::new(config),
            db,
            hasher,
        }
    }
}
