//! PostgreSQL implementation of [`OptionStore`]

use super::core::PgOptionStore;
use crate::errors::StoreError;
use crate::record::{OptionRecord, OptionRow};
use crate::traits::OptionStore;
use crate::value::OptionValue;
use async_trait::async_trait;
use sqlx::types::Json;

#[async_trait]
impl OptionStore for PgOptionStore {
    async fn upsert(&self, key: &str, value: &OptionValue) -> Result<OptionRecord, StoreError> {
        let row = sqlx::query_as::<_, OptionRow>(&self.sql.upsert)
            .bind(key)
            .bind(Json(value.to_json()))
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "upsert", e))?;

        tracing::trace!(key, table = self.table_name(), "Upserted option");
        Ok(row.into())
    }

    async fn find(&self, key: &str) -> Result<Option<OptionRecord>, StoreError> {
        let row = sqlx::query_as::<_, OptionRow>(&self.sql.find)
            .bind(key)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "find", e))?;

        Ok(row.map(OptionRecord::from))
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(key)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(&self.sql.exists)
            .bind(key)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "exists", e))?;

        Ok(exists)
    }

    async fn list_all(&self) -> Result<Vec<OptionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, OptionRow>(&self.sql.list_all)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "list_all", e))?;

        Ok(rows.into_iter().map(OptionRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(self.table_name(), "ping", e))?;
        Ok(())
    }
}
