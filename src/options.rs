//! Client configuration shared by every API client.
//!
//! A single [`ClientOptions`] value can be handed to [`ApiClient`],
//! [`BetaApiClient`] and [`TrackClient`]; each client picks the base URL that
//! belongs to its API.
//!
//! [`ApiClient`]: crate::ApiClient
//! [`BetaApiClient`]: crate::BetaApiClient
//! [`TrackClient`]: crate::TrackClient

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// The user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("Customer.io Rust Client/", env!("CARGO_PKG_VERSION"));

/// The data center a Customer.io workspace lives in.
///
/// # Examples
///
/// ```
/// use customerio::Region;
///
/// let region: Region = "EU".parse().unwrap();
/// assert_eq!(region, Region::Eu);
/// assert_eq!(region.track_url(), "https://track-eu.customer.io");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// United States data center.
    #[default]
    Us,
    /// European Union data center.
    Eu,
}

impl Region {
    /// Base URL of the core API.
    pub fn api_url(self) -> &'static str {
        match self {
            Region::Us => "https://api.customer.io",
            Region::Eu => "https://api-eu.customer.io",
        }
    }

    /// Base URL of the App (beta) API.
    pub fn beta_api_url(self) -> &'static str {
        match self {
            Region::Us => "https://beta-api.customer.io",
            Region::Eu => "https://beta-api-eu.customer.io",
        }
    }

    /// Base URL of the Track API.
    pub fn track_url(self) -> &'static str {
        match self {
            Region::Us => "https://track.customer.io",
            Region::Eu => "https://track-eu.customer.io",
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            other => Err(Error::ConfigurationError(format!(
                "Unknown region: {other}"
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => f.write_str("us"),
            Region::Eu => f.write_str("eu"),
        }
    }
}

/// Which API a client talks to. Selects the region URL to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Api,
    BetaApi,
    Track,
}

/// Options applied when constructing a client.
///
/// Options are plain values: building a client reads them once and the
/// client never changes afterwards.
///
/// # Examples
///
/// ```no_run
/// use customerio::{ApiClient, BetaApiClient, ClientOptions, Region, TrackClient};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http = reqwest::Client::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let options = ClientOptions::new()
///     .region(Region::Eu)
///     .http_client(http)
///     .user_agent("my-app/1.0");
///
/// let api = ApiClient::with_options("app-key", &options)?;
/// let beta = BetaApiClient::with_options("app-key", &options)?;
/// let track = TrackClient::with_options("site-id", "api-key", &options)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    region: Region,
    base_url: Option<Url>,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl ClientOptions {
    /// Creates options with the defaults: US region, default user agent and
    /// a fresh `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the data center. Only the base URL is affected.
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Replaces the HTTP transport.
    ///
    /// Timeouts, proxies and connection pooling are whatever the supplied
    /// client is configured with.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sends every request to `url` instead of the region's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    pub(crate) fn resolve_base_url(&self, service: Service) -> String {
        match &self.base_url {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => match service {
                Service::Api => self.region.api_url(),
                Service::BetaApi => self.region.beta_api_url(),
                Service::Track => self.region.track_url(),
            }
            .to_string(),
        }
    }

    pub(crate) fn resolve_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub(crate) fn resolve_http_client(&self) -> Result<reqwest::Client> {
        match &self.http_client {
            Some(client) => Ok(client.clone()),
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            }),
        }
    }
}
