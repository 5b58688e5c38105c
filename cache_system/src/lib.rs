//! Cache system for the option store
//!
//! This crate provides the [`CacheBackend`] abstraction with a Redis backend
//! and an in-process backend, plus TTL resolution shared by both.

pub mod backend;
pub mod errors;
pub mod memory;
pub mod prelude;
pub mod redis_cache;
pub mod ttl;

// Re-export centralized config
pub use config::CacheConfig;

pub use backend::CacheBackend;
pub use errors::CacheError;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use ttl::{Expiry, MAX_TTL, Ttl};
