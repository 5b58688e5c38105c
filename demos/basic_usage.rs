//! # Basic Usage Example
//!
//! This example demonstrates the option store against PostgreSQL and Redis:
//! - Loading configuration from optionstore.toml (or OPTIONSTORE_CONFIG)
//! - Creating the option table
//! - Cache hits vs forced fresh reads
//! - Removing options

use optionstore::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🚀 optionstore Basic Usage Example");
    println!("==================================");

    let config = AppConfig::load()?;
    let options = Options::connect(&config).await?;

    if let Err(e) = options.health_check().await {
        println!("❌ Health check failed: {}", e);
        println!("💡 Please start Redis: docker run -d --name redis -p 6379:6379 redis:7-alpine");
        return Ok(());
    }

    options.auto_migrate(false).await?;
    println!("✅ Connected and option table ready");

    // Write and cache for a minute
    options.set("site_name", "Acme", Some(Ttl::seconds(60))).await?;
    options.set("maintenance", false, None).await?;

    let name = options.get("site_name", OptionValue::Null, None).await?;
    println!("   • site_name (cached): {:?}", name.as_str());

    // Simulate another process writing straight to the table
    options
        .store()
        .upsert("site_name", &OptionValue::from("Acme Corp"))
        .await?;

    let stale = options.get("site_name", OptionValue::Null, None).await?;
    let fresh = options
        .get("site_name", OptionValue::Null, Some(Ttl::seconds(60)))
        .await?;
    println!("   • site_name without TTL: {:?}", stale.as_str());
    println!("   • site_name with TTL (fresh read): {:?}", fresh.as_str());

    let missing = options.get("footer_text", "© Acme", None).await?;
    println!("   • footer_text default: {:?}", missing.as_str());

    println!("\n📋 All options:");
    for record in options.all().await? {
        println!("   • {} = {}", record.key, record.value.to_json());
    }

    for key in ["site_name", "maintenance", "footer_text"] {
        options.remove(key).await?;
    }
    println!("\n🧹 Options removed");

    Ok(())
}
