//! Core option front
//!
//! This module contains [`Options`], the cache-aside layer that sits in front of an
//! [`OptionStore`] and a [`CacheBackend`].

use cache_system::{CacheBackend, Ttl};
use config::{OptionsConfig, DEFAULT_CACHE_PREFIX};
use store_object::{validate_option_key, OptionRecord, OptionStore, OptionValue, StoreError};

use crate::errors::OptionsError;

/// Cache key for an option: the namespace prefix followed by the option key
pub fn cache_key(prefix: &str, key: &str) -> String {
    let mut cache_key = String::with_capacity(prefix.len() + key.len());
    cache_key.push_str(prefix);
    cache_key.push_str(key);
    cache_key
}

/// Cache-aside access to persisted options
///
/// Build one from a store and a cache, then share it by reference or clone it
/// (clones share the same store pool and cache connection).
#[derive(Debug, Clone)]
pub struct Options<S, C> {
    store: S,
    cache: C,
    cache_prefix: String,
    cache_defaults: bool,
}

impl<S, C> Options<S, C>
where
    S: OptionStore,
    C: CacheBackend,
{
    /// Create a front with the default cache prefix, caching defaults on a miss
    pub fn new(store: S, cache: C) -> Self {
        Self {
            store,
            cache,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            cache_defaults: true,
        }
    }

    /// Create a front using the prefix and miss policy from configuration
    pub fn with_config(store: S, cache: C, config: &OptionsConfig) -> Self {
        Self::new(store, cache)
            .cache_prefix(&config.cache_prefix)
            .cache_defaults(config.cache_defaults)
    }

    /// Namespace cache keys with `prefix`
    pub fn cache_prefix(mut self, prefix: &str) -> Self {
        self.cache_prefix = prefix.to_string();
        self
    }

    /// Whether a miss caches the caller's default. When disabled, a miss evicts the
    /// cache entry instead.
    pub fn cache_defaults(mut self, enabled: bool) -> Self {
        self.cache_defaults = enabled;
        self
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the cache backend
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Cache key used for an option key
    pub fn cache_key(&self, key: &str) -> String {
        cache_key(&self.cache_prefix, key)
    }

    /// Set the value of an option.
    ///
    /// With a TTL the cache entry is written first, then the row is upserted. Without a
    /// TTL the cache is left untouched, so a previously cached value stays visible to
    /// [`get`](Self::get) until it expires or a read forces a refresh.
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<OptionValue>,
        ttl: Option<Ttl>,
    ) -> Result<(), OptionsError> {
        check_key(key)?;
        let value = value.into();

        if ttl.is_some() {
            self.cache.put(&self.cache_key(key), &value, ttl).await?;
        }

        self.store.upsert(key, &value).await?;
        debug_log!("Set option '{}' (cached: {})", key, ttl.is_some());
        Ok(())
    }

    /// Get the value of an option, or `default` if it is not stored.
    ///
    /// Without a TTL a live cache entry is returned as is. With a TTL the store is always
    /// read and the cache refreshed with that TTL.
    pub async fn get(
        &self,
        key: &str,
        default: impl Into<OptionValue>,
        ttl: Option<Ttl>,
    ) -> Result<OptionValue, OptionsError> {
        check_key(key)?;
        let cache_key = self.cache_key(key);

        if ttl.is_none() {
            // A cached null counts as a miss
            if let Some(cached) = self.cache.get::<OptionValue>(&cache_key).await? {
                if !cached.is_null() {
                    trace_log!("Cache hit for option '{}'", key);
                    return Ok(cached);
                }
            }
        }

        // A stored null resolves to the default as well
        let stored = self
            .store
            .find(key)
            .await?
            .map(|record| record.value)
            .filter(|value| !value.is_null());

        let value = match stored {
            Some(value) => value,
            None if self.cache_defaults => default.into(),
            None => {
                self.cache.forget(&cache_key).await?;
                debug_log!("Option '{}' not stored, returning default", key);
                return Ok(default.into());
            }
        };

        self.cache.put(&cache_key, &value, ttl).await?;
        debug_log!("Loaded option '{}' from store", key);
        Ok(value)
    }

    /// Delete an option and evict its cache entry. Missing keys are a no-op.
    pub async fn remove(&self, key: &str) -> Result<(), OptionsError> {
        check_key(key)?;

        self.store.delete(key).await?;
        self.cache.forget(&self.cache_key(key)).await?;

        debug_log!("Removed option '{}'", key);
        Ok(())
    }

    /// Whether the store holds the option. The cache is not consulted.
    pub async fn exists(&self, key: &str) -> Result<bool, OptionsError> {
        check_key(key)?;
        Ok(self.store.exists(key).await?)
    }

    /// Every stored option, read straight from the store
    pub async fn all(&self) -> Result<Vec<OptionRecord>, OptionsError> {
        Ok(self.store.list_all().await?)
    }

    /// Check store and cache connectivity
    pub async fn health_check(&self) -> Result<(), OptionsError> {
        self.store.ping().await?;
        self.cache.ping().await?;
        Ok(())
    }
}

fn check_key(key: &str) -> Result<(), OptionsError> {
    validate_option_key(key).map_err(|e| OptionsError::Store(StoreError::InvalidKey(e)))
}
