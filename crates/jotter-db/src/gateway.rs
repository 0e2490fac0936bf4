//! Lazily-constructed persistence gateway.
//!
//! The gateway owns the single connection pool for the process. Nothing
//! touches the network until the first call to [`Gateway::pool`], so a
//! process without `DATABASE_URL` can still start and serve the endpoints
//! that do not need the database.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use jotter_core::{Config, Error, Result};

use crate::pool::{create_pool_with_config, log_pool_metrics, ConnectionStrategy};

/// Shared handle to the database pool, built on first use.
pub struct Gateway {
    config: Arc<Config>,
    pool: OnceCell<PgPool>,
}

impl Gateway {
    /// Create a gateway. Does not connect.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already-connected pool.
    pub fn with_pool(config: Arc<Config>, pool: PgPool) -> Self {
        Self {
            config,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    /// The strategy the gateway uses (or will use) to connect.
    pub fn strategy(&self) -> Result<ConnectionStrategy> {
        let url = self.config.require_database_url()?;
        Ok(ConnectionStrategy::select(url, self.config.force_pooled))
    }

    /// Whether the pool has been built yet.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Return the pool, building it on first call.
    ///
    /// Concurrent first callers wait on the same initialization. If it
    /// fails the cell stays empty and the next call tries again.
    pub async fn pool(&self) -> Result<&PgPool> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    /// Run `SELECT 1` through the pool.
    pub async fn health_check(&self) -> Result<()> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(Error::Database)?;
        log_pool_metrics(pool);
        Ok(())
    }

    async fn connect(&self) -> Result<PgPool> {
        let url = self.config.require_database_url()?;
        let strategy = ConnectionStrategy::select(url, self.config.force_pooled);

        info!(
            subsystem = "db",
            component = "gateway",
            op = "connect",
            strategy = strategy.as_str(),
            host = url.host_str().unwrap_or_default(),
            "Building database pool on first use"
        );

        let pool = create_pool_with_config(url.as_str(), strategy.pool_config()).await?;

        #[cfg(feature = "migrations")]
        run_migrations(&pool).await?;

        Ok(pool)
    }
}

/// Apply embedded migrations.
#[cfg(feature = "migrations")]
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    debug!(
        subsystem = "db",
        component = "gateway",
        op = "migrate",
        "Applying pending migrations"
    );
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotter_core::ConfigResolver;

    fn gateway(vars: &[(&str, &str)]) -> Gateway {
        let config = ConfigResolver::from_vars(vars.iter().map(|(k, v)| (*k, *v)))
            .get()
            .unwrap();
        Gateway::new(config)
    }

    #[test]
    fn test_new_does_not_connect() {
        let gw = gateway(&[("DATABASE_URL", "postgres://localhost:1/none")]);
        assert!(!gw.is_connected());
    }

    #[tokio::test]
    async fn test_missing_url_is_config_error_at_first_use() {
        let gw = gateway(&[]);
        let err = gw.pool().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!gw.is_connected());
    }

    #[test]
    fn test_strategy_follows_config() {
        let gw = gateway(&[
            ("DATABASE_URL", "postgres://localhost/jotter"),
            ("DATABASE_FORCE_POOLED", "true"),
        ]);
        assert_eq!(gw.strategy().unwrap(), ConnectionStrategy::Pooled);

        let gw = gateway(&[("DATABASE_URL", "postgres://localhost/jotter")]);
        assert_eq!(gw.strategy().unwrap(), ConnectionStrategy::Direct);
    }
}
