//! In-process cache backend
//!
//! Entries are stored as JSON text so values round-trip exactly as they do through Redis.
//! Expired entries are dropped when they are next read, and swept from the whole map
//! on every write.

use crate::backend::CacheBackend;
use crate::errors::CacheError;
use crate::ttl::{Expiry, Ttl};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Cache held in process memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Option<Duration>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire entries written without a TTL after `default_ttl`
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = Some(default_ttl);
        self
    }

    /// Live entry payload, purging it if it has expired
    async fn live_payload(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.payload.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            tracing::trace!(key, "Purged expired cache entry");
        }
        None
    }

    /// Remaining lifetime of a live entry; `None` if missing or without expiry
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
            .map(|expires_at| expires_at.saturating_duration_since(now))
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every entry
    pub async fn flush(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn put<T>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<(), CacheError>
    where
        T: Serialize + Sync,
    {
        let payload = serde_json::to_string(value)?;
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        if entries.len() < before {
            tracing::trace!(purged = before - entries.len(), "Purged expired cache entries");
        }

        match Expiry::resolve(ttl, self.default_ttl) {
            Expiry::Never => {
                entries.insert(key.to_string(), CacheEntry { payload, expires_at: None });
            }
            Expiry::After(duration) => {
                // Bounded by MAX_TTL
                let expires_at = now.checked_add(duration).ok_or(CacheError::TtlOutOfRange)?;
                entries.insert(
                    key.to_string(),
                    CacheEntry {
                        payload,
                        expires_at: Some(expires_at),
                    },
                );
            }
            Expiry::Immediately => {
                entries.remove(key);
            }
        }
        Ok(())
    }

    async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send,
    {
        match self.live_payload(key).await {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.live_payload(key).await.is_some())
    }

    async fn forget(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
