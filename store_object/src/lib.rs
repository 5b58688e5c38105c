//! Store Object - option persistence layer
//!
//! This crate provides the option value and record types, the [`OptionStore`] trait,
//! and its PostgreSQL and in-memory implementations.

pub mod errors;
pub mod memory_store;
pub mod pg_store;
pub mod prelude;
pub mod record;
pub mod traits;
pub mod validation;
pub mod value;

pub use errors::StoreError;
pub use memory_store::MemoryOptionStore;
pub use pg_store::PgOptionStore;
pub use record::OptionRecord;
pub use traits::OptionStore;
pub use validation::{validate_option_key, ValidatedTableName, ValidationError, MAX_KEY_LENGTH};
pub use value::OptionValue;

use sqlx::PgPool;

pub type DbPool = PgPool;
