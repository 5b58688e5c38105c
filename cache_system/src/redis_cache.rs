//! Redis cache backend
//!
//! This module provides the Redis implementation of [`CacheBackend`]
//! with lazy connection management. A connection that fails with an IO error is
//! dropped and reopened by the next command.

use crate::backend::CacheBackend;
use crate::errors::CacheError;
use crate::ttl::{Expiry, Ttl};
use async_trait::async_trait;
use config::CacheConfig;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Redis-based cache backend
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<Client>,
    default_ttl: Option<Duration>,
    connection_timeout: Duration,
    connection_pool: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = match self.connection_pool.try_read() {
            Ok(pool) => {
                if pool.is_some() {
                    "connected"
                } else {
                    "no_connection"
                }
            }
            Err(_) => "lock_error",
        };

        f.debug_struct("RedisCache")
            .field("default_ttl", &self.default_ttl)
            .field("connection_timeout", &self.connection_timeout)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisCache {
    /// Create a new Redis cache. No connection is made until the first command.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.redis_url.as_str())?;

        Ok(Self {
            client: Arc::new(client),
            default_ttl: config.default_ttl_seconds.map(Duration::from_secs),
            connection_timeout: Duration::from_millis(config.connection_timeout_ms),
            connection_pool: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the shared connection, opening one if none is held
    async fn get_connection(&self) -> Result<MultiplexedConnection, CacheError> {
        if let Some(connection) = self.connection_pool.read().await.as_ref() {
            return Ok(connection.clone());
        }

        let mut pool = self.connection_pool.write().await;
        // Another task may have connected while this one waited for the lock
        if let Some(connection) = pool.as_ref() {
            return Ok(connection.clone());
        }

        let connection = tokio::time::timeout(
            self.connection_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Timeout)??;
        tracing::debug!("Opened Redis connection");
        *pool = Some(connection.clone());
        Ok(connection)
    }

    /// Drop the shared connection. The next command opens a new one.
    pub async fn reset_connection(&self) {
        if self.connection_pool.write().await.take().is_some() {
            tracing::debug!("Dropped Redis connection");
        }
    }

    /// Convert a command result, dropping the shared connection if it was lost
    async fn checked<T>(&self, result: redis::RedisResult<T>) -> Result<T, CacheError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                if is_connection_lost(&e) {
                    tracing::warn!(error = %e, "Redis connection lost");
                    self.reset_connection().await;
                }
                Err(e.into())
            }
        }
    }

    /// Remaining lifetime of an entry. `Ok(None)` for a missing entry or one without expiry.
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError> {
        let mut conn = self.get_connection().await?;

        // -2 for a missing key, -1 for a key without expiry
        let millis: i64 = self.checked(conn.pttl(key).await).await?;
        Ok(u64::try_from(millis).ok().map(Duration::from_millis))
    }

    /// Default expiry for writes without a TTL
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn put<T>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<(), CacheError>
    where
        T: Serialize + Sync,
    {
        let json_str = serde_json::to_string(value)?;
        let mut conn = self.get_connection().await?;

        match Expiry::resolve(ttl, self.default_ttl) {
            Expiry::Never => {
                let _: () = self.checked(conn.set(key, &json_str).await).await?;
            }
            Expiry::After(duration) => {
                let millis = u64::try_from(duration.as_millis())
                    .map_err(|_| CacheError::TtlOutOfRange)?
                    .max(1);
                let _: () = self.checked(conn.pset_ex(key, &json_str, millis).await).await?;
            }
            Expiry::Immediately => {
                let _: i32 = self.checked(conn.del(key).await).await?;
            }
        }

        tracing::trace!(key, "Redis cache put");
        Ok(())
    }

    async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send,
    {
        let mut conn = self.get_connection().await?;
        let cached_data: Option<String> = self.checked(conn.get(key).await).await?;

        match cached_data {
            Some(json_str) => Ok(Some(serde_json::from_str(&json_str)?)),
            None => Ok(None),
        }
    }

    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let exists: bool = self.checked(conn.exists(key).await).await?;
        Ok(exists)
    }

    async fn forget(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = self.checked(conn.del(key).await).await?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _pong: String = self
            .checked(redis::cmd("PING").query_async(&mut conn).await)
            .await?;
        Ok(())
    }
}

/// Errors after which a multiplexed connection is unusable and must be reopened
fn is_connection_lost(error: &redis::RedisError) -> bool {
    error.is_io_error() || error.is_connection_dropped() || error.is_connection_refusal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_connect() {
        let config = CacheConfig::new("redis://127.0.0.1:6390".to_string(), Some(60), 500);
        let cache = RedisCache::new(&config).unwrap();

        assert_eq!(cache.default_ttl(), Some(Duration::from_secs(60)));
        assert!(format!("{:?}", cache).contains("no_connection"));
    }

    #[test]
    fn test_rejects_malformed_url() {
        let config = CacheConfig::new("not a url".to_string(), None, 500);
        assert!(matches!(
            RedisCache::new(&config),
            Err(CacheError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_connection_lost_errors() {
        let reset = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ));
        assert!(is_connection_lost(&reset));

        let broken_pipe = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe",
        ));
        assert!(is_connection_lost(&broken_pipe));

        let type_error = redis::RedisError::from((redis::ErrorKind::TypeError, "bad reply"));
        assert!(!is_connection_lost(&type_error));
    }

    #[tokio::test]
    async fn test_failed_connect_is_retried() {
        // Nothing listens on port 1
        let config = CacheConfig::new("redis://127.0.0.1:1".to_string(), None, 500);
        let cache = RedisCache::new(&config).unwrap();

        assert!(cache.ping().await.is_err());
        assert!(format!("{:?}", cache).contains("no_connection"));

        // A failed attempt leaves nothing cached, so the next command dials again
        assert!(cache.ping().await.is_err());
        assert!(format!("{:?}", cache).contains("no_connection"));
    }

    #[tokio::test]
    async fn test_reconnects_after_reset() {
        let Ok(redis_url) = std::env::var("REDIS_URL") else {
            eprintln!("REDIS_URL not set, skipping");
            return;
        };
        let cache = RedisCache::new(&CacheConfig::new(redis_url, None, 3000)).unwrap();
        let key = "optionstore:test:reconnect";

        cache.put(key, &"before", Some(Ttl::seconds(60))).await.unwrap();
        assert!(format!("{:?}", cache).contains("\"connected\""));

        cache.reset_connection().await;
        assert!(format!("{:?}", cache).contains("no_connection"));

        let value: Option<String> = cache.get(key).await.unwrap();
        assert_eq!(value.as_deref(), Some("before"));
        assert!(format!("{:?}", cache).contains("\"connected\""));

        cache.forget(key).await.unwrap();
    }
}
