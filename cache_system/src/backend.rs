//! Cache backend abstraction
//!
//! Every backend stores JSON-encoded values under plain string keys.
//! Namespacing is the caller's job.

use crate::errors::CacheError;
use crate::ttl::Ttl;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Expiring key/value cache
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Store a value. `None` applies the backend's default expiry; a TTL that resolves
    /// to zero removes the entry instead.
    async fn put<T>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<(), CacheError>
    where
        T: Serialize + Sync;

    /// Fetch a live entry
    async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send;

    /// Check whether a live entry exists
    async fn has(&self, key: &str) -> Result<bool, CacheError>;

    /// Remove an entry, returning whether one was present
    async fn forget(&self, key: &str) -> Result<bool, CacheError>;

    /// Check connectivity
    async fn ping(&self) -> Result<(), CacheError>;
}
