//! Basic example: list collections, update a campaign action and track an event.
//!
//! This example shows how to:
//! - Share one set of options across the three clients
//! - Call the core, App and Track APIs
//! - Read typed response data
//!
//! Run with:
//! `CUSTOMERIO_APP_KEY=... CUSTOMERIO_SITE_ID=... CUSTOMERIO_TRACK_KEY=... cargo run --example basic_call`
//!
//! Set `CUSTOMERIO_REGION=eu` for EU workspaces.

use customerio::{
    ApiClient, BetaApiClient, ClientOptions, Error, Region, TrackClient,
    UpdateCampaignActionRequest,
};
use serde_json::json;

fn env(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::ConfigurationError(format!("{name} is not set")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("customerio=debug,basic_call=info")
        .init();

    let region: Region = std::env::var("CUSTOMERIO_REGION")
        .unwrap_or_else(|_| "us".to_string())
        .parse()?;
    let options = ClientOptions::new().region(region);
    let app_key = env("CUSTOMERIO_APP_KEY")?;

    println!("=== Collections ===");
    let api = ApiClient::with_options(app_key.as_str(), &options)?;
    for collection in api.list_collections().await?.collections {
        println!(
            "{:>6}  {:<24} {} rows, {} bytes",
            collection.id, collection.name, collection.rows, collection.bytes
        );
    }
    println!();

    println!("=== Campaign action ===");
    if let (Ok(campaign_id), Ok(action_id)) = (
        std::env::var("CUSTOMERIO_CAMPAIGN_ID"),
        std::env::var("CUSTOMERIO_ACTION_ID"),
    ) {
        let beta = BetaApiClient::with_options(app_key.as_str(), &options)?;
        let request = UpdateCampaignActionRequest {
            subject: Some("Hello from Rust".to_string()),
            ..Default::default()
        };
        let action = beta
            .update_campaign_action(&campaign_id, &action_id, &request)
            .await?;
        println!("Action: {} ({})", action.name, action.action_type);
        println!("Created: {}", action.created);
        println!("Updated: {}", action.updated);
    } else {
        println!("Set CUSTOMERIO_CAMPAIGN_ID and CUSTOMERIO_ACTION_ID to update an action");
    }
    println!();

    println!("=== Track ===");
    let track = TrackClient::with_options(
        env("CUSTOMERIO_SITE_ID")?,
        env("CUSTOMERIO_TRACK_KEY")?,
        &options,
    )?;
    track
        .identify("rust-demo", &json!({"email": "rust-demo@example.com"}))
        .await?;
    track
        .track("rust-demo", "demo_ran", &json!({"region": region.to_string()}))
        .await?;
    println!("Identified rust-demo and tracked demo_ran");

    Ok(())
}
