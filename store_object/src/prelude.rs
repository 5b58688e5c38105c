//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::OptionStore;

// Error types
pub use crate::errors::StoreError;

// Stores
pub use crate::memory_store::MemoryOptionStore;
pub use crate::pg_store::PgOptionStore;

// Data types
pub use crate::record::OptionRecord;
pub use crate::value::OptionValue;

// Validation
pub use crate::validation::{ValidatedTableName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::PgPool;
