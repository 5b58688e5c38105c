//! Bootstrapping an option front from configuration
//!
//! This module opens the PostgreSQL pool and the Redis cache described by an
//! [`AppConfig`] and wires them into an [`Options`] handle.

use cache_system::RedisCache;
use config::{AppConfig, DatabaseConfig};
use sqlx::PgPool;
use std::time::Duration;
use store_object::PgOptionStore;

use crate::core::Options;
use crate::errors::OptionsError;

/// Option front backed by PostgreSQL and Redis
pub type PgOptions = Options<PgOptionStore, RedisCache>;

/// Open a connection pool for the database configuration
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, OptionsError> {
    let connection_string = config.connection_string();

    let mut pool_options = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    // Set max lifetime if specified
    if config.max_lifetime_seconds > 0 {
        pool_options = pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
    }

    let pool = pool_options.connect(&connection_string).await?;
    debug_log!("Connected to database '{}' on {}", config.database, config.host);
    Ok(pool)
}

impl Options<PgOptionStore, RedisCache> {
    /// Connect to the database and cache described by `config`
    pub async fn connect(config: &AppConfig) -> Result<Self, OptionsError> {
        let pool = connect_pool(&config.database).await?;
        Self::from_pool(pool, config)
    }

    /// Build a front over an existing pool
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Result<Self, OptionsError> {
        let store = PgOptionStore::new(pool, &config.options.table_name)?;
        let cache = RedisCache::new(&config.cache)?;
        Ok(Self::with_config(store, cache, &config.options))
    }

    /// Load configuration from the environment and connect
    pub async fn from_env() -> Result<Self, OptionsError> {
        let config = AppConfig::load()?;
        Self::connect(&config).await
    }
}
