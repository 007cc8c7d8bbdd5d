//! The base request primitive shared by every API client.
//!
//! [`BaseClient`] knows how to authenticate, serialize a body, send exactly
//! one request and hand back the raw status and body. It never retries and
//! imposes no timeout of its own; both belong to the `reqwest::Client` the
//! caller supplies through [`ClientOptions`].

use crate::{
    metadata::RequestMetadata,
    options::{ClientOptions, Service},
    response::RawResponse,
    Error, Result,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::HeaderValue;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// How a client authenticates.
#[derive(Clone)]
pub(crate) enum Credentials {
    /// App API key sent as `Authorization: Bearer <key>`.
    Bearer(String),
    /// Track API site ID and key sent as HTTP basic auth.
    Basic { site_id: String, api_key: String },
}

impl Credentials {
    fn header_value(&self) -> Result<HeaderValue> {
        let raw = match self {
            Credentials::Bearer(key) => format!("Bearer {key}"),
            Credentials::Basic { site_id, api_key } => {
                format!("Basic {}", STANDARD.encode(format!("{site_id}:{api_key}")))
            }
        };

        let mut value = HeaderValue::try_from(raw).map_err(|e| {
            Error::ConfigurationError(format!("Invalid credentials header: {}", e))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(..)"),
            Credentials::Basic { site_id, .. } => f
                .debug_struct("Basic")
                .field("site_id", site_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Immutable connection settings plus the transport.
///
/// Cloning is cheap and clones share the same transport.
#[derive(Clone)]
pub(crate) struct BaseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    user_agent: String,
    user_agent_header: HeaderValue,
    authorization: HeaderValue,
    credentials: Credentials,
}

impl BaseClient {
    pub(crate) fn new(
        credentials: Credentials,
        service: Service,
        options: &ClientOptions,
    ) -> Result<Self> {
        let user_agent = options.resolve_user_agent().to_string();
        let user_agent_header = HeaderValue::try_from(user_agent.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid user agent: {}", e)))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client: options.resolve_http_client()?,
                base_url: options.resolve_base_url(service),
                user_agent,
                user_agent_header,
                authorization: credentials.header_value()?,
                credentials,
            }),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Sends one request and returns the raw response.
    ///
    /// The path in `metadata` is appended to the base URL verbatim, so any
    /// path prefix in the base URL is kept. Without a body no payload is sent.
    pub(crate) async fn send<B>(
        &self,
        metadata: RequestMetadata,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::SerializationFailed(e.to_string()))?;

        let url = format!("{}{}", self.inner.base_url, metadata.path);

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(metadata.method, url.as_str())
            .header(AUTHORIZATION, self.inner.authorization.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, self.inner.user_agent_header.clone());

        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let start_time = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let latency = start_time.elapsed();

        tracing::debug!(
            status = status.as_u16(),
            latency_ms = latency.as_millis() as u64,
            url = %url,
            "Received HTTP response"
        );

        Ok(RawResponse::new(status, body.to_vec(), latency))
    }
}

impl fmt::Debug for BaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseClient")
            .field("base_url", &self.inner.base_url)
            .field("user_agent", &self.inner.user_agent)
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let value = Credentials::Bearer("secret".to_string())
            .header_value()
            .unwrap();

        assert_eq!(value.to_str().unwrap(), "Bearer secret");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_basic_header() {
        let value = Credentials::Basic {
            site_id: "site".to_string(),
            api_key: "key".to_string(),
        }
        .header_value()
        .unwrap();

        // base64("site:key")
        assert_eq!(value.to_str().unwrap(), "Basic c2l0ZTprZXk=");
    }

    #[test]
    fn test_invalid_key_is_a_configuration_error() {
        let result = Credentials::Bearer("bad\nkey".to_string()).header_value();

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let client = BaseClient::new(
            Credentials::Basic {
                site_id: "site".to_string(),
                api_key: "super-secret".to_string(),
            },
            Service::Track,
            &ClientOptions::new(),
        )
        .unwrap();

        let debug = format!("{:?}", client);
        assert!(debug.contains("site"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_invalid_user_agent() {
        let options = ClientOptions::new().user_agent("agent\r\nX-Injected: 1");
        let result = BaseClient::new(Credentials::Bearer("k".to_string()), Service::Api, &options);

        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }
}
