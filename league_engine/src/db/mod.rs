//! PostgreSQL persistence for standings.
//!
//! [`Database`] owns the connection pool, applies the schema in
//! `migrations/` and hands out [`PgStandingsRepository`] handles that share
//! the pool.

use crate::standings::PointsConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::{sync::Arc, time::Duration};

pub mod config;
pub mod repository;
pub mod timeouts;

pub use config::DatabaseConfig;
pub use repository::{PgStandingsRepository, StandingsStore};

/// Errors raised while opening or preparing the standings database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("Database error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Standings database: a shared pool plus schema management
#[derive(Clone)]
pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Connect with a validated configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use league_engine::db::{Database, DatabaseConfig, StandingsStore};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    ///     db.migrate().await?;
    ///
    ///     let table = db.standings().table(1).await?;
    ///     println!("{} teams", table.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        config.validate().map_err(DatabaseError::InvalidConfig)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        log::info!(
            "Connected standings database pool ({}-{} connections)",
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        log::info!("Standings schema is up to date");
        Ok(())
    }

    /// Standings store with points read from the environment
    pub fn standings(&self) -> PgStandingsRepository {
        PgStandingsRepository::new(self.pool.clone())
    }

    /// Standings store with an explicit default points configuration
    pub fn standings_with_points(&self, points: PointsConfig) -> PgStandingsRepository {
        PgStandingsRepository::with_points(self.pool.clone(), points)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
