//! Client for the Customer.io Track API: people, events and devices.

use crate::{
    client::{BaseClient, Credentials},
    metadata::RequestMetadata,
    options::{ClientOptions, Service},
    Error, Result,
};
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};

const CUSTOMERS_PATH: &str = "/api/v1/customers";

/// A client for the Track API (`https://track.customer.io`), authenticated
/// with a site ID and Track API key.
///
/// Any 2xx answer counts as success. Empty required identifiers are rejected
/// with [`Error::MissingParam`] before anything is sent.
///
/// # Examples
///
/// ```no_run
/// use customerio::TrackClient;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), customerio::Error> {
/// let client = TrackClient::new("site-id", "track-api-key")?;
///
/// client
///     .identify("42", &json!({"email": "ada@example.com", "plan": "pro"}))
///     .await?;
/// client
///     .track("42", "purchased", &json!({"sku": "ABC-1", "price": 23.45}))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrackClient {
    base: BaseClient,
}

/// Identifies one side of a profile merge.
///
/// Serializes as a single-key object such as `{"email": "ada@example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    /// The customer's `id` attribute.
    Id(String),
    /// The customer's email address.
    Email(String),
    /// The Customer.io-assigned `cio_id`.
    CioId(String),
}

impl Identifier {
    fn value(&self) -> &str {
        match self {
            Identifier::Id(v) | Identifier::Email(v) | Identifier::CioId(v) => v,
        }
    }
}

#[derive(Serialize)]
struct EventPayload<'a, D: ?Sized> {
    name: &'a str,
    data: &'a D,
    #[serde(skip_serializing_if = "Option::is_none")]
    anonymous_id: Option<&'a str>,
}

#[derive(Serialize)]
struct DevicePayload {
    device: Map<String, Value>,
}

#[derive(Serialize)]
struct MergePayload<'a> {
    primary: &'a Identifier,
    secondary: &'a Identifier,
}

fn require(param: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(Error::MissingParam(param))
    } else {
        Ok(())
    }
}

fn customer_path(method: Method, customer_id: &str) -> RequestMetadata {
    RequestMetadata::new(method, CUSTOMERS_PATH).segment(customer_id)
}

impl TrackClient {
    /// Creates a client for the US region with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are not valid header text or the
    /// default HTTP client cannot be built.
    pub fn new(site_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(site_id, api_key, &ClientOptions::default())
    }

    /// Creates a client with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials or user agent are not valid
    /// header text.
    pub fn with_options(
        site_id: impl Into<String>,
        api_key: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self> {
        let credentials = Credentials::Basic {
            site_id: site_id.into(),
            api_key: api_key.into(),
        };

        Ok(Self {
            base: BaseClient::new(credentials, Service::Track, options)?,
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

    /// Creates or updates a person, setting the given attributes.
    ///
    /// Sends `PUT /api/v1/customers/{customer_id}` with `attributes` as the body.
    pub async fn identify<A>(&self, customer_id: &str, attributes: &A) -> Result<()>
    where
        A: Serialize + ?Sized,
    {
        require("customer_id", customer_id)?;

        let metadata = customer_path(Method::PUT, customer_id);
        self.base.send(metadata, Some(attributes)).await?.ensure_success()
    }

    /// Records an event for a known person.
    ///
    /// Sends `POST /api/v1/customers/{customer_id}/events`.
    pub async fn track<D>(&self, customer_id: &str, name: &str, data: &D) -> Result<()>
    where
        D: Serialize + ?Sized,
    {
        require("customer_id", customer_id)?;
        require("name", name)?;

        let metadata = customer_path(Method::POST, customer_id).literal("events");
        let payload = EventPayload {
            name,
            data,
            anonymous_id: None,
        };
        self.base.send(metadata, Some(&payload)).await?.ensure_success()
    }

    /// Records an event that is not tied to a known person.
    ///
    /// Sends `POST /api/v1/events`. An empty `anonymous_id` is left out of
    /// the body.
    pub async fn track_anonymous<D>(&self, anonymous_id: &str, name: &str, data: &D) -> Result<()>
    where
        D: Serialize + ?Sized,
    {
        require("name", name)?;

        let metadata = RequestMetadata::new(Method::POST, "/api/v1/events");
        let payload = EventPayload {
            name,
            data,
            anonymous_id: Some(anonymous_id).filter(|id| !id.is_empty()),
        };
        self.base.send(metadata, Some(&payload)).await?.ensure_success()
    }

    /// Deletes a person.
    ///
    /// Sends `DELETE /api/v1/customers/{customer_id}`.
    pub async fn delete(&self, customer_id: &str) -> Result<()> {
        require("customer_id", customer_id)?;

        let metadata = customer_path(Method::DELETE, customer_id);
        self.base.send::<()>(metadata, None).await?.ensure_success()
    }

    /// Adds or updates a push device for a person.
    ///
    /// Sends `PUT /api/v1/customers/{customer_id}/devices` with
    /// `{"device": {"id": ..., "platform": ..., ...data}}`. `id` and
    /// `platform` always win over same-named keys in `data`.
    pub async fn add_device(
        &self,
        customer_id: &str,
        device_id: &str,
        platform: &str,
        data: &Map<String, Value>,
    ) -> Result<()> {
        require("customer_id", customer_id)?;
        require("device_id", device_id)?;
        require("platform", platform)?;

        let mut device = data.clone();
        device.insert("id".to_string(), Value::from(device_id));
        device.insert("platform".to_string(), Value::from(platform));

        let metadata = customer_path(Method::PUT, customer_id).literal("devices");
        self.base
            .send(metadata, Some(&DevicePayload { device }))
            .await?
            .ensure_success()
    }

    /// Removes a push device from a person.
    ///
    /// Sends `DELETE /api/v1/customers/{customer_id}/devices/{device_id}`.
    pub async fn delete_device(&self, customer_id: &str, device_id: &str) -> Result<()> {
        require("customer_id", customer_id)?;
        require("device_id", device_id)?;

        let metadata = customer_path(Method::DELETE, customer_id)
            .literal("devices")
            .segment(device_id);
        self.base.send::<()>(metadata, None).await?.ensure_success()
    }

    /// Merges `secondary` into `primary`; the secondary profile is deleted.
    ///
    /// Sends `POST /api/v1/merge_customers`.
    pub async fn merge_customers(&self, primary: &Identifier, secondary: &Identifier) -> Result<()> {
        require("primary", primary.value())?;
        require("secondary", secondary.value())?;

        let metadata = RequestMetadata::new(Method::POST, "/api/v1/merge_customers");
        let payload = MergePayload { primary, secondary };
        self.base.send(metadata, Some(&payload)).await?.ensure_success()
    }
}
