//! Option table bootstrap
//!
//! This module creates the option table for fronts backed by PostgreSQL.

use cache_system::CacheBackend;
use store_object::PgOptionStore;

use crate::core::Options;
use crate::errors::OptionsError;

impl<C: CacheBackend> Options<PgOptionStore, C> {
    /// Create the option table if it does not exist.
    /// If recreate is true, drops the existing table first.
    pub async fn auto_migrate(&self, recreate: bool) -> Result<(), OptionsError> {
        self.store().migrate(recreate).await?;
        debug_log!("Option table '{}' ready", self.store().table_name());
        Ok(())
    }
}
