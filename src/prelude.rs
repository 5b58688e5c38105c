//! Convenience re-exports for common optionstore usage
//!
//! # Example
//!
//! ```rust
//! use optionstore::prelude::*;
//!
//! let options = Options::new(MemoryOptionStore::new(), MemoryCache::new());
//! assert_eq!(options.cache_key("site_name"), "options:site_name");
//! ```

// Core components
pub use crate::connection::PgOptions;
pub use crate::core::{cache_key, Options};
pub use crate::errors::OptionsError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, OptionsConfig};

// Stores and option types
pub use store_object::prelude::*;

// Cache backends and TTLs
pub use cache_system::prelude::*;

// Common external dependencies
pub use anyhow;
pub use sqlx;
