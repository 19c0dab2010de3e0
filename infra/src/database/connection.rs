//! MySQL connection pool
//!
//! Owns the SQLx pool for the configured database, bootstraps the schema and
//! carries the per-call timeout handed to the stores.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use cm_shared::config::DatabaseConfig;

use super::schema;
use crate::InfrastructureError;

/// Idle connections are dropped after ten minutes
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Connections are recycled after thirty minutes
const MAX_LIFETIME: Duration = Duration::from_secs(1800);
/// Statements slower than this are logged at warn
const SLOW_STATEMENT: Duration = Duration::from_secs(1);

/// Shared handle to the MySQL pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl DatabasePool {
    /// Connects to `config.url`, failing once `connect_timeout` elapses
    ///
    /// # Example
    /// ```no_run
    /// use cm_infra::database::DatabasePool;
    /// use cm_shared::config::DatabaseConfig;
    ///
    /// async fn open() -> Result<DatabasePool, cm_infra::InfrastructureError> {
    ///     DatabasePool::new(DatabaseConfig::new("mysql://app:pw@localhost/openlogic")).await
    /// }
    /// ```
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(IDLE_TIMEOUT)
            .max_lifetime(MAX_LIFETIME)
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Could not open MySQL pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            query_timeout_secs = config.query_timeout,
            "MySQL pool open"
        );

        Ok(Self {
            pool,
            query_timeout: Duration::from_secs(config.query_timeout),
        })
    }

    /// The underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Per-call limit for store operations
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Creates the teachers, students, courses and purchases tables if missing
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        for statement in schema::ALL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!(tables = schema::ALL.len(), "Schema ready");
        Ok(())
    }

    /// Snapshot of pool occupancy
    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            open: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Waits for checked-out connections to return, then closes them all
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}

/// Pool occupancy at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub open: u32,
    pub idle: usize,
    pub max: u32,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} connections open, {} idle", self.open, self.max, self.idle)
    }
}
