use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPool;

use crate::config::Config;
use crate::services::{DbMenuUpdater, MenuUpdater};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM database connection (primary for queries)
    pub db: DatabaseConnection,
    /// SQLx pool for migrations only
    pub pg_pool: PgPool,
    pub config: Config,
    /// Menu subsystem notified when collections disappear
    pub menus: Arc<dyn MenuUpdater>,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations and wire the database-backed services
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let pg_pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(config.database_max_connections)
            .min_connections(1)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        let menus: Arc<dyn MenuUpdater> = Arc::new(DbMenuUpdater::new(db.clone()));

        Ok(Self {
            db,
            pg_pool,
            config,
            menus,
        })
    }

    /// Build state over an already migrated pool (used by tests)
    pub fn from_pool(pg_pool: PgPool, config: Config) -> Self {
        let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pg_pool.clone());
        let menus: Arc<dyn MenuUpdater> = Arc::new(DbMenuUpdater::new(db.clone()));

        Self {
            db,
            pg_pool,
            config,
            menus,
        }
    }

    /// Replace the menu collaborator
    pub fn with_menus(mut self, menus: Arc<dyn MenuUpdater>) -> Self {
        self.menus = menus;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
