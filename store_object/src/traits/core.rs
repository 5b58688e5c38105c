//! Trait definitions
//!
//! This module defines the persistence operations the option front relies on.

use crate::errors::StoreError;
use crate::record::OptionRecord;
use crate::value::OptionValue;
use async_trait::async_trait;

/// Authoritative key/value persistence for options
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Insert the option or overwrite the value of the existing row with this key
    async fn upsert(&self, key: &str, value: &OptionValue) -> Result<OptionRecord, StoreError>;

    /// Get an option by key
    async fn find(&self, key: &str) -> Result<Option<OptionRecord>, StoreError>;

    /// Delete an option by key, returning whether a row was removed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Check whether a row exists for the key
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// List every option, oldest first
    async fn list_all(&self) -> Result<Vec<OptionRecord>, StoreError>;

    /// Check connectivity
    async fn ping(&self) -> Result<(), StoreError>;
}
