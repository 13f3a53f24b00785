//! Storage: PostgreSQL connection pooling, migrations and the repository
//! implementations.
//!
//! [`Database`] owns the pool and the statement timeout. It is opened once at
//! startup, cloned into the PostgreSQL repositories and closed at shutdown.
//! [`Repositories`] bundles one handle per entity so the server can be wired
//! against either backend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::errors::{TournamentError, TournamentResult};

pub mod config;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use config::DatabaseConfig;
pub use memory::MemoryStore;
pub use postgres::{PgMatchRepository, PgPlayerRepository, PgTeamRepository, PgTournamentRepository};
pub use repository::{MatchRepository, PlayerRepository, TeamRepository, TournamentRepository};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    query_timeout: Duration,
}

impl Database {
    /// Open the connection pool, retrying while the server is unreachable
    ///
    /// Makes up to `config.connect_retries` attempts with
    /// `config.retry_delay()` between them.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use football_tournament::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::from_env();
    ///     let db = Database::connect(&config).await?;
    ///     db.health_check().await?;
    ///     db.close().await;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let attempts = config.connect_retries.max(1);
        let mut attempt = 1;

        loop {
            match Self::open_pool(config).await {
                Ok(pool) => {
                    log::info!(
                        "Connected to database {} (attempt {attempt}/{attempts})",
                        config.redacted_url()
                    );
                    return Ok(Self {
                        pool,
                        query_timeout: config.query_timeout(),
                    });
                }
                Err(e) if attempt < attempts => {
                    log::warn!(
                        "Database not ready (attempt {attempt}/{attempts}): {e}. Retrying in {:?}",
                        config.retry_delay()
                    );
                    tokio::time::sleep(config.retry_delay()).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::error!("Giving up on database after {attempts} attempts: {e}");
                    return Err(e);
                }
            }
        }
    }

    async fn open_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await
    }

    /// Apply pending schema migrations from `football_tournament/migrations`.
    pub async fn migrate(&self) -> TournamentResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        log::info!("Database migrations applied");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run one statement under the configured timeout.
    ///
    /// Constraint violations come back as domain errors; a statement that
    /// outlives the timeout is `TournamentError::Timeout`.
    pub async fn run<F, T>(&self, future: F) -> TournamentResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        bounded(self.query_timeout, future).await
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// One repository handle per entity, sharing a backend.
#[derive(Clone)]
pub struct Repositories {
    pub players: Arc<dyn PlayerRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub tournaments: Arc<dyn TournamentRepository>,
    pub matches: Arc<dyn MatchRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories over a shared pool.
    pub fn postgres(db: &Database) -> Self {
        Self {
            players: Arc::new(PgPlayerRepository::new(db.clone())),
            teams: Arc::new(PgTeamRepository::new(db.clone())),
            tournaments: Arc::new(PgTournamentRepository::new(db.clone())),
            matches: Arc::new(PgMatchRepository::new(db.clone())),
        }
    }

    /// In-memory repositories over a fresh store.
    pub fn in_memory() -> Self {
        MemoryStore::new().repositories()
    }
}

async fn bounded<F, T>(limit: Duration, future: F) -> TournamentResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(TournamentError::Timeout(limit)),
    }
}
