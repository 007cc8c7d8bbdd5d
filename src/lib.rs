//! # customerio - Customer.io API clients
//!
//! Async clients for the three Customer.io REST APIs, built on top of `reqwest`:
//!
//! - [`ApiClient`] for the core API (collections, transactional email),
//! - [`BetaApiClient`] for the App API (campaign actions),
//! - [`TrackClient`] for the Track API (people, events, devices).
//!
//! Each operation sends exactly one request. Nothing is retried and no timeout
//! is imposed beyond what the configured `reqwest::Client` enforces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use customerio::{ApiClient, BetaApiClient, ClientOptions, Region, UpdateCampaignActionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), customerio::Error> {
//!     let options = ClientOptions::new().region(Region::Eu);
//!
//!     let api = ApiClient::with_options("app-api-key", &options)?;
//!     for collection in api.list_collections().await?.collections {
//!         println!("{} ({} rows)", collection.name, collection.rows);
//!     }
//!
//!     let beta = BetaApiClient::with_options("app-api-key", &options)?;
//!     let request = UpdateCampaignActionRequest {
//!         subject: Some("Bienvenue".to_string()),
//!         ..Default::default()
//!     };
//!     let action = beta
//!         .update_campaign_localized_action("12", "34", "fr", &request)
//!         .await?;
//!     println!("Updated {} at {}", action.name, action.updated);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Failed responses are normalized into [`ApiError`], whose message is the
//! first error the API reported, or the raw body when the body was not a
//! recognizable error envelope:
//!
//! ```no_run
//! use customerio::{ApiClient, CollectionRequest, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = ApiClient::new("app-api-key")?;
//! match client.update_collection("7", &CollectionRequest::new().name("x")).await {
//!     Ok(response) => println!("Renamed to {}", response.collection.name),
//!     Err(Error::Api(api)) => eprintln!("HTTP {}: {}", api.status, api.message()),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and failures are reported through `tracing` under the
//! `customerio` target. Install any subscriber to see them.

mod api;
mod beta_api;
pub mod campaigns;
mod client;
pub mod collections;
mod error;
pub mod metadata;
pub mod options;
pub mod response;
pub mod track;
pub mod transactional;

pub use api::ApiClient;
pub use beta_api::BetaApiClient;
pub use campaigns::{CampaignAction, UpdateCampaignActionRequest};
pub use collections::{Collection, CollectionRequest, CollectionResponse, ListCollectionsResponse};
pub use error::{ApiError, Error, ErrorDetail, ErrorSource, Result};
pub use options::{ClientOptions, Region, DEFAULT_USER_AGENT};
pub use track::{Identifier, TrackClient};
pub use transactional::{SendEmailRequest, SendEmailResponse};
