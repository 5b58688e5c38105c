//! # optionstore
//!
//! Persisted key/value options for applications: a PostgreSQL table fronted by a
//! cache-aside layer with per-call TTL control.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use optionstore::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!
//!     let options = Options::connect(&config).await?;
//!     options.auto_migrate(false).await?;
//!
//!     // Write through to the cache for one hour
//!     options.set("site_name", "Acme", Some(Ttl::seconds(3600))).await?;
//!
//!     // Served from the cache while the entry is live
//!     let name = options.get("site_name", OptionValue::Null, None).await?;
//!     println!("Site name: {:?}", name.as_str());
//!
//!     // Force a fresh read from the table and refresh the cache
//!     let name = options.get("site_name", "Unnamed", Some(Ttl::seconds(60))).await?;
//!     println!("Fresh site name: {:?}", name.as_str());
//!
//!     options.remove("site_name").await?;
//!     assert!(!options.exists("site_name").await?);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod connection;
pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use connection::{connect_pool, PgOptions};
pub use core::{cache_key, Options};
pub use errors::OptionsError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, OptionsConfig};

// Re-export internal crates used in the public API
pub use cache_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
