//! Client for the Customer.io App (beta) API.

use crate::{
    client::{BaseClient, Credentials},
    options::{ClientOptions, Service},
    Result,
};

/// A client for the App API (`https://beta-api.customer.io`), authenticated
/// with an App API key.
///
/// Campaign operations are in [`campaigns`](crate::campaigns).
#[derive(Debug, Clone)]
pub struct BetaApiClient {
    pub(crate) base: BaseClient,
}

impl BetaApiClient {
    /// Creates a client for the US region with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not valid header text or the default
    /// HTTP client cannot be built.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_options(key, &ClientOptions::default())
    }

    /// Creates a client with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or user agent is not valid header text.
    pub fn with_options(key: impl Into<String>, options: &ClientOptions) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(Credentials::Bearer(key.into()), Service::BetaApi, options)?,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    /// The `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        self.base.user_agent()
    }
}
