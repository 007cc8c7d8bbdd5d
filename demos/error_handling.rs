//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Tell API errors apart from network and decoding failures
//! - Read every error entry the API reported
//! - Catch missing identifiers before a request is sent
//!
//! Run with: `cargo run --example error_handling`

use customerio::{ApiClient, CollectionRequest, Error, TrackClient};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("customerio=info")
        .init();

    println!("=== Example 1: Handling API Errors ===");
    // An invalid key gets rejected by the API
    let client = ApiClient::new("not-a-real-key")?;
    match client
        .update_collection("does/not/exist", &CollectionRequest::new().name("x"))
        .await
    {
        Ok(response) => println!("Success: {:?}", response.collection),
        Err(Error::Api(api)) => {
            println!("API Error!");
            println!("  Status: {}", api.status);
            println!("  Message: {}", api.message());
            for (i, detail) in api.errors.iter().enumerate() {
                println!("  [{}] {} (status {:?})", i, detail.detail, detail.status);
                if let Some(source) = &detail.source {
                    println!("      at {}", source.pointer);
                }
            }
        }
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            println!("Deserialization Failed!");
            println!("  Status: {}", status);
            println!("  Serde error: {}", serde_error);
            println!(
                "  Raw response (first 200 chars): {}",
                raw_response.chars().take(200).collect::<String>()
            );
        }
        Err(Error::Network(e)) => println!("Network error: {}", e),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Missing Parameters ===");
    let track = TrackClient::new("site-id", "api-key")?;
    match track.identify("", &json!({"email": "nobody@example.com"})).await {
        Err(Error::MissingParam(param)) => println!("Rejected locally: {} is required", param),
        other => println!("Unexpected: {:?}", other),
    }

    Ok(())
}
