use crate::core::config::DatabaseConfig;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::time::Duration;

/// Create the MySQL connection pool without connecting.
///
/// Connections are established on first use; the pool replaces broken
/// connections transparently, so a database outage degrades persistence
/// rather than failing startup.
pub fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect_lazy(&config.connect_url())
}
