//! Cache-aside protocol tests over the in-memory store and cache
//!
//! Covers read/write/evict behaviour of `Options` without external services.

use chrono::{TimeDelta, Utc};
use optionstore::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Memory store that counts reads, to tell cache hits from store reads
#[derive(Debug, Clone, Default)]
struct CountingStore {
    inner: MemoryOptionStore,
    finds: Arc<AtomicUsize>,
}

impl CountingStore {
    fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OptionStore for CountingStore {
    async fn upsert(&self, key: &str, value: &OptionValue) -> Result<OptionRecord, StoreError> {
        self.inner.upsert(key, value).await
    }

    async fn find(&self, key: &str) -> Result<Option<OptionRecord>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.exists(key).await
    }

    async fn list_all(&self) -> Result<Vec<OptionRecord>, StoreError> {
        self.inner.list_all().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

fn setup() -> Options<CountingStore, MemoryCache> {
    Options::new(CountingStore::default(), MemoryCache::new())
}

async fn cached(options: &Options<CountingStore, MemoryCache>, key: &str) -> Option<OptionValue> {
    options
        .cache()
        .get::<OptionValue>(&options.cache_key(key))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_set_writes_store() {
    let options = setup();
    options.set("site_name", "Acme", None).await.unwrap();

    let record = options.store().find("site_name").await.unwrap().unwrap();
    assert_eq!(record.value, OptionValue::from("Acme"));
    assert!(options.exists("site_name").await.unwrap());
}

#[tokio::test]
async fn test_set_without_ttl_leaves_cache_untouched() {
    let options = setup();
    options.set("site_name", "Acme", None).await.unwrap();
    assert!(cached(&options, "site_name").await.is_none());

    options
        .set("site_name", "Cached", Some(Ttl::seconds(60)))
        .await
        .unwrap();
    options.set("site_name", "Stored", None).await.unwrap();

    // The earlier cache write stays until it expires or is refreshed
    assert_eq!(
        cached(&options, "site_name").await,
        Some(OptionValue::from("Cached"))
    );
    assert_eq!(
        options.get("site_name", OptionValue::Null, None).await.unwrap(),
        OptionValue::from("Cached")
    );
}

#[tokio::test]
async fn test_set_with_ttl_writes_cache_and_store() {
    let options = setup();
    options
        .set("site_name", "Acme", Some(Ttl::seconds(60)))
        .await
        .unwrap();

    assert_eq!(
        cached(&options, "site_name").await,
        Some(OptionValue::from("Acme"))
    );
    let remaining = options
        .cache()
        .ttl(&options.cache_key("site_name"))
        .await
        .unwrap();
    assert!(remaining <= Duration::from_secs(60));

    let value = options.get("site_name", OptionValue::Null, None).await.unwrap();
    assert_eq!(value, OptionValue::from("Acme"));
    assert_eq!(options.store().finds(), 0, "cache hit must not read the store");
}

#[tokio::test]
async fn test_upsert_overwrites_without_duplicates() {
    let options = setup();
    let ttl = Some(Ttl::seconds(60));
    options.set("limit", 1, ttl).await.unwrap();
    options.set("limit", 2, ttl).await.unwrap();

    assert_eq!(
        options.get("limit", OptionValue::Null, None).await.unwrap(),
        OptionValue::Int(2)
    );

    let all = options.all().await.unwrap();
    assert_eq!(all.iter().filter(|record| record.key == "limit").count(), 1);
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_get_missing_returns_default() {
    let options = setup();

    let value = options.get("missing", "fallback", None).await.unwrap();
    assert_eq!(value, OptionValue::from("fallback"));
    assert!(!options.exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_get_miss_caches_default() {
    let options = setup();
    options.get("missing", "first", None).await.unwrap();

    assert_eq!(cached(&options, "missing").await, Some(OptionValue::from("first")));

    // A later lookup with another default sees the cached one
    let value = options.get("missing", "second", None).await.unwrap();
    assert_eq!(value, OptionValue::from("first"));
    assert_eq!(options.store().finds(), 1);
}

#[tokio::test]
async fn test_get_miss_without_default_caching() {
    let options = setup().cache_defaults(false);

    let value = options.get("missing", "first", None).await.unwrap();
    assert_eq!(value, OptionValue::from("first"));
    assert!(cached(&options, "missing").await.is_none());

    let value = options.get("missing", "second", None).await.unwrap();
    assert_eq!(value, OptionValue::from("second"));
    assert_eq!(options.store().finds(), 2);

    // Stored values are still cached
    options.set("present", true, None).await.unwrap();
    options.get("present", OptionValue::Null, None).await.unwrap();
    assert_eq!(cached(&options, "present").await, Some(OptionValue::Bool(true)));
}

#[tokio::test]
async fn test_forced_read_evicts_stale_default_when_not_caching_defaults() {
    let options = setup().cache_defaults(false);
    options
        .cache()
        .put(&options.cache_key("gone"), &OptionValue::from("stale"), None)
        .await
        .unwrap();

    let value = options
        .get("gone", "fallback", Some(Ttl::seconds(60)))
        .await
        .unwrap();
    assert_eq!(value, OptionValue::from("fallback"));
    assert!(cached(&options, "gone").await.is_none());
}

#[tokio::test]
async fn test_cached_null_is_a_miss() {
    let options = setup();
    options.get("missing", OptionValue::Null, None).await.unwrap();
    options.get("missing", OptionValue::Null, None).await.unwrap();

    assert_eq!(options.store().finds(), 2);
}

#[tokio::test]
async fn test_stored_null_resolves_to_default() {
    let options = setup();
    options.set("nothing", OptionValue::Null, None).await.unwrap();

    assert!(options.exists("nothing").await.unwrap());
    assert_eq!(
        options.get("nothing", 5, None).await.unwrap(),
        OptionValue::Int(5)
    );
}

#[tokio::test]
async fn test_get_with_ttl_rereads_store_and_refreshes_cache() {
    let options = setup();
    options
        .set("site_name", "Acme", Some(Ttl::seconds(60)))
        .await
        .unwrap();

    // An external writer bypasses the front
    options
        .store()
        .upsert("site_name", &OptionValue::from("Acme2"))
        .await
        .unwrap();

    let stale = options.get("site_name", OptionValue::Null, None).await.unwrap();
    assert_eq!(stale, OptionValue::from("Acme"));
    assert_eq!(options.store().finds(), 0);

    let fresh = options
        .get("site_name", OptionValue::Null, Some(Ttl::seconds(60)))
        .await
        .unwrap();
    assert_eq!(fresh, OptionValue::from("Acme2"));
    assert_eq!(options.store().finds(), 1);
    assert_eq!(
        cached(&options, "site_name").await,
        Some(OptionValue::from("Acme2"))
    );

    let after = options.get("site_name", OptionValue::Null, None).await.unwrap();
    assert_eq!(after, OptionValue::from("Acme2"));
    assert_eq!(options.store().finds(), 1);
}

#[tokio::test]
async fn test_cache_entry_expiry_falls_back_to_store() {
    let options = setup();
    options
        .set("banner", "old", Some(Ttl::After(Duration::from_millis(50))))
        .await
        .unwrap();
    options
        .store()
        .upsert("banner", &OptionValue::from("new"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(120)).await;

    let value = options.get("banner", OptionValue::Null, None).await.unwrap();
    assert_eq!(value, OptionValue::from("new"));
    assert_eq!(options.store().finds(), 1);
}

#[tokio::test]
async fn test_ttl_in_the_past_does_not_cache() {
    let options = setup();
    let expired = Ttl::At(Utc::now() - TimeDelta::minutes(1));
    options.set("flag", true, Some(expired)).await.unwrap();

    assert!(cached(&options, "flag").await.is_none());
    assert!(options.exists("flag").await.unwrap());
}

#[tokio::test]
async fn test_remove_clears_store_and_cache() {
    let options = setup();
    options
        .set("site_name", "Acme", Some(Ttl::seconds(60)))
        .await
        .unwrap();

    options.remove("site_name").await.unwrap();

    assert!(!options.exists("site_name").await.unwrap());
    assert!(cached(&options, "site_name").await.is_none());
    assert_eq!(
        options.get("site_name", "gone", None).await.unwrap(),
        OptionValue::from("gone")
    );

    // Removing again is a no-op
    options.remove("site_name").await.unwrap();
    options.remove("never_set").await.unwrap();
}

#[tokio::test]
async fn test_exists_ignores_cache() {
    let options = setup();
    options
        .cache()
        .put(&options.cache_key("ghost"), &OptionValue::from("boo"), None)
        .await
        .unwrap();

    assert!(!options.exists("ghost").await.unwrap());
}

#[tokio::test]
async fn test_all_bypasses_cache() {
    let options = setup();
    options.set("a", 1, None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    options.set("b", json!({"nested": [1, 2]}), None).await.unwrap();
    options
        .cache()
        .put(&options.cache_key("cache_only"), &OptionValue::from(3), None)
        .await
        .unwrap();

    let all = options.all().await.unwrap();
    let keys: Vec<&str> = all.iter().map(|record| record.key.as_str()).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(
        all[1].value.as_object().unwrap()["nested"],
        OptionValue::from(vec![1, 2])
    );
}

#[tokio::test]
async fn test_structured_values_round_trip_through_cache() {
    let options = setup();
    let value = OptionValue::from(json!({
        "theme": "dark",
        "ratio": 0.75,
        "tags": ["a", "b"],
        "enabled": true
    }));
    options
        .set("ui", value.clone(), Some(Ttl::seconds(60)))
        .await
        .unwrap();

    assert_eq!(options.get("ui", OptionValue::Null, None).await.unwrap(), value);
    assert_eq!(options.store().finds(), 0);
}

#[tokio::test]
async fn test_invalid_keys_are_rejected() {
    let options = setup();

    let result = options.set("", "value", None).await;
    assert!(matches!(
        result,
        Err(OptionsError::Store(StoreError::InvalidKey(ValidationError::Empty)))
    ));

    let long_key = "k".repeat(256);
    assert!(options.get(&long_key, OptionValue::Null, None).await.is_err());
    assert!(options.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_prefix_namespaces_cache() {
    let cache = MemoryCache::new();
    let options = Options::new(MemoryOptionStore::new(), cache.clone()).cache_prefix("site:");
    options
        .set("theme", "dark", Some(Ttl::seconds(60)))
        .await
        .unwrap();

    assert!(cache.has("site:theme").await.unwrap());
    assert!(!cache.has("options:theme").await.unwrap());
}

#[tokio::test]
async fn test_health_check_with_memory_backends() {
    let options = setup();
    options.health_check().await.unwrap();
}
