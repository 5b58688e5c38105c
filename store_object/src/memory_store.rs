//! In-process option store
//!
//! Keeps rows in a map behind an async lock. Useful for tests and for embedding the
//! option front without a database.

use crate::errors::StoreError;
use crate::record::OptionRecord;
use crate::traits::OptionStore;
use crate::value::OptionValue;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Option store held in memory. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    rows: Arc<RwLock<HashMap<String, OptionRecord>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn upsert(&self, key: &str, value: &OptionValue) -> Result<OptionRecord, StoreError> {
        let mut rows = self.rows.write().await;
        let record = match rows.get_mut(key) {
            Some(existing) => {
                existing.value = value.clone();
                existing.updated_at = Utc::now();
                existing.clone()
            }
            None => {
                let record = OptionRecord::new(key, value.clone());
                rows.insert(key.to_string(), record.clone());
                record
            }
        };

        Ok(record)
    }

    async fn find(&self, key: &str) -> Result<Option<OptionRecord>, StoreError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.rows.read().await.contains_key(key))
    }

    async fn list_all(&self) -> Result<Vec<OptionRecord>, StoreError> {
        let mut records: Vec<OptionRecord> = self.rows.read().await.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key.cmp(&b.key))
        });
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites() {
        let store = MemoryOptionStore::new();

        let created = store.upsert("site_name", &"Acme".into()).await.unwrap();
        let updated = store.upsert("site_name", &"Acme2".into()).await.unwrap();

        assert_eq!(updated.value.as_str(), Some("Acme2"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value.as_str(), Some("Acme2"));
    }

    #[tokio::test]
    async fn test_find_exists_delete() {
        let store = MemoryOptionStore::new();
        store.upsert("limit", &10.into()).await.unwrap();

        assert!(store.exists("limit").await.unwrap());
        assert_eq!(
            store.find("limit").await.unwrap().unwrap().value,
            OptionValue::Int(10)
        );

        assert!(store.delete("limit").await.unwrap());
        assert!(!store.delete("limit").await.unwrap());
        assert!(!store.exists("limit").await.unwrap());
        assert!(store.find("limit").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_oldest_first() {
        let store = MemoryOptionStore::new();
        for key in ["first", "second", "third"] {
            store.upsert(key, &OptionValue::Null).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        // Updating does not move a row
        store.upsert("first", &true.into()).await.unwrap();

        let keys: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.key)
            .collect();
        assert_eq!(keys, ["first", "second", "third"]);
    }
}
