//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::backend::CacheBackend;
pub use crate::errors::CacheError;
pub use crate::memory::MemoryCache;
pub use crate::redis_cache::RedisCache;
pub use crate::ttl::Ttl;

// Re-export centralized config
pub use config::CacheConfig;

// Common external dependencies
pub use async_trait::async_trait;
pub use redis;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;
