//! Client for the core Customer.io API.

use crate::{
    client::{BaseClient, Credentials},
    options::{ClientOptions, Service},
    Result,
};

/// A client for the core API (`https://api.customer.io`), authenticated with
/// an App API key.
///
/// Resource operations live next to their types: see
/// [`collections`](crate::collections) and
/// [`transactional`](crate::transactional).
///
/// # Examples
///
/// ```no_run
/// use customerio::{ApiClient, CollectionRequest};
///
/// # async fn example() -> Result<(), customerio::Error> {
/// let client = ApiClient::new("app-api-key")?;
///
/// let created = client
///     .create_collection(&CollectionRequest::new().name("products"))
///     .await?;
/// println!("Created collection {}", created.collection.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) base: BaseClient,
}

impl ApiClient {
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
            base: BaseClient::new(Credentials::Bearer(key.into()), Service::Api, options)?,
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
