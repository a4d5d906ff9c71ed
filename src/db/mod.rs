//! Database access: bounded connection pool and scoped sessions
//!
//! The pool is constructed once at startup from [`DatabaseConfig`] and
//! injected into the repository layer; there is no process-wide singleton.
//! Every unit of work goes through a [`Session`] checked out of this pool.

pub mod session;

pub use session::Session;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::{config::DatabaseConfig, error::AppResult};

/// Handle to the bounded connection pool.
///
/// Cloning is cheap and shares the underlying pool. Acquisition waits up to
/// the configured timeout and then fails as `PoolExhausted`; it never waits
/// unboundedly.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open the pool described by the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an already-constructed pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out a connection and begin a transaction on it.
    ///
    /// The connection is exclusively owned by the returned [`Session`] until
    /// it commits or is dropped.
    pub async fn session(&self) -> AppResult<Session> {
        let tx = self.pool.begin().await?;
        Ok(Session::new(tx))
    }

    /// Readiness probe: one round trip through the pool.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Drain the pool: waits for checked-out connections to come back, then
    /// closes them. Subsequent acquisitions fail as `PoolExhausted`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
