//! Database connection pool management.

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info, warn};
use url::Url;

use jotter_core::{Error, Result};

/// Default maximum number of connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Hosts served through a transaction-mode pooler in front of serverless Postgres.
pub const POOLED_PROVIDER_DOMAINS: &[&str] = &["neon.tech"];

/// Pool configuration options.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Idle connection timeout duration.
    pub idle_timeout: Duration,
    /// Maximum connection lifetime.
    pub max_lifetime: Option<Duration>,
    /// Prepared statement cache size per connection. `0` disables caching,
    /// which transaction-mode poolers require.
    pub statement_cache_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
            statement_cache_capacity: 100,
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the minimum number of connections.
    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the maximum connection lifetime.
    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Set the prepared statement cache size.
    pub fn statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.statement_cache_capacity = capacity;
        self
    }
}

/// How the gateway talks to PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStrategy {
    /// Long-lived connections straight to the server.
    Direct,
    /// Short-lived connections through a serverless provider's pooler.
    Pooled,
}

impl ConnectionStrategy {
    /// Pick a strategy from the connection string's host.
    pub fn select(url: &Url, force_pooled: bool) -> Self {
        if force_pooled {
            return Self::Pooled;
        }
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let pooled = POOLED_PROVIDER_DOMAINS
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)));
        if pooled {
            Self::Pooled
        } else {
            Self::Direct
        }
    }

    /// Pool tuning for this strategy.
    pub fn pool_config(&self) -> PoolConfig {
        match self {
            Self::Direct => PoolConfig::default(),
            Self::Pooled => PoolConfig::new()
                .max_connections(5)
                .min_connections(0)
                .idle_timeout(Duration::from_secs(60))
                .max_lifetime(Some(Duration::from_secs(300)))
                .statement_cache_capacity(0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Pooled => "pooled",
        }
    }
}

/// Create a new PostgreSQL connection pool with custom configuration.
pub async fn create_pool_with_config(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    info!(
        subsystem = "db",
        component = "pool",
        op = "create",
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_secs = config.connect_timeout.as_secs(),
        idle_timeout_secs = config.idle_timeout.as_secs(),
        statement_cache_capacity = config.statement_cache_capacity,
        "Creating database connection pool"
    );

    let connect_options = PgConnectOptions::from_str(database_url)
        .map_err(Error::Database)?
        .statement_cache_capacity(config.statement_cache_capacity);

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout);

    if let Some(max_lifetime) = config.max_lifetime {
        options = options.max_lifetime(max_lifetime);
    }

    let pool = options
        .connect_with(connect_options)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = "db",
        component = "pool",
        op = "established",
        pool_size = pool.size(),
        pool_idle = pool.num_idle(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Log current pool health metrics.
///
/// Emits structured debug-level log with pool size, idle count,
/// and warns if idle connections drop below 1 (potential exhaustion).
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle();

    debug!(
        subsystem = "db",
        component = "pool",
        op = "metrics",
        pool_size = size,
        pool_idle = idle,
        "Pool health check"
    );

    if idle == 0 && size > 0 {
        warn!(
            subsystem = "db",
            component = "pool",
            pool_size = size,
            "Connection pool has no idle connections, potential exhaustion"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_default_max_connections() {
        assert_eq!(DEFAULT_MAX_CONNECTIONS, 10);
    }

    #[test]
    fn test_pool_config_builder() {
        let config = PoolConfig::new()
            .max_connections(20)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_strategy_direct_for_plain_host() {
        let strategy = ConnectionStrategy::select(&url("postgres://localhost/jotter"), false);
        assert_eq!(strategy, ConnectionStrategy::Direct);
    }

    #[test]
    fn test_strategy_pooled_for_serverless_host() {
        let strategy = ConnectionStrategy::select(
            &url("postgres://u:p@ep-cool-rain-123456-pooler.us-east-2.aws.neon.tech/db"),
            false,
        );
        assert_eq!(strategy, ConnectionStrategy::Pooled);
    }

    #[test]
    fn test_strategy_host_match_is_case_insensitive() {
        let strategy = ConnectionStrategy::select(&url("postgres://EP-X.NEON.TECH/db"), false);
        assert_eq!(strategy, ConnectionStrategy::Pooled);
    }

    #[test]
    fn test_strategy_ignores_lookalike_domain() {
        let strategy =
            ConnectionStrategy::select(&url("postgres://notneon.tech.example.com/db"), false);
        assert_eq!(strategy, ConnectionStrategy::Direct);
    }

    #[test]
    fn test_strategy_force_flag() {
        let strategy = ConnectionStrategy::select(&url("postgres://localhost/jotter"), true);
        assert_eq!(strategy, ConnectionStrategy::Pooled);
    }

    #[test]
    fn test_pooled_config_disables_statement_cache() {
        let config = ConnectionStrategy::Pooled.pool_config();
        assert_eq!(config.statement_cache_capacity, 0);
        assert_eq!(config.min_connections, 0);
        assert!(config.max_connections < DEFAULT_MAX_CONNECTIONS);
    }
}
