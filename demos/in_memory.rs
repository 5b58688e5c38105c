//! # In-Memory Example
//!
//! Runs the option front over the in-process store and cache, with tracing output.
//! Run with `RUST_LOG=debug cargo run --example in_memory --features debug-logging`.

use optionstore::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::new(
        MemoryOptionStore::new(),
        MemoryCache::new().with_default_ttl(Duration::from_secs(300)),
    );

    options.set("items_per_page", 25, Some(Ttl::seconds(30))).await?;
    options
        .set("features", vec!["search", "export"], None)
        .await?;

    let per_page = options.get("items_per_page", 10, None).await?;
    let features = options.get("features", OptionValue::Null, None).await?;
    let theme = options.get("theme", "light", None).await?;

    println!("items_per_page = {:?}", per_page.as_i64());
    println!("features = {}", features.to_json());
    println!("theme = {:?}", theme.as_str());
    println!("stored options: {}", options.all().await?.len());

    options.remove("items_per_page").await?;
    println!("items_per_page exists: {}", options.exists("items_per_page").await?);

    Ok(())
}
