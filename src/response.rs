//! Raw responses returned by the base request primitive.
//!
//! A [`RawResponse`] keeps the untouched body bytes and status code so each
//! endpoint can decide what success means and how to decode it.

use crate::{ApiError, Error, Result};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// The body and status of one HTTP round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The raw response body.
    pub body: Vec<u8>,

    /// Time from sending the request until the body was fully read.
    pub latency: Duration,
}

impl RawResponse {
    /// Creates a new `RawResponse`.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>, latency: Duration) -> Self {
        Self {
            status,
            body: body.into(),
            latency,
        }
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes a `200 OK` response into `T`.
    ///
    /// Any other status is normalized into [`Error::Api`].
    ///
    /// # Examples
    ///
    /// ```
    /// use customerio::response::RawResponse;
    /// use http::StatusCode;
    /// use std::time::Duration;
    ///
    /// let ok = RawResponse::new(StatusCode::OK, r#"{"id":7}"#, Duration::ZERO);
    /// let value: serde_json::Value = ok.decode().unwrap();
    /// assert_eq!(value["id"], 7);
    ///
    /// let failed = RawResponse::new(StatusCode::NOT_FOUND, "no such collection", Duration::ZERO);
    /// let err = failed.decode::<serde_json::Value>().unwrap_err();
    /// assert_eq!(err.to_string(), "no such collection");
    /// ```
    pub fn decode<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.status != StatusCode::OK {
            return Err(self.into_api_error());
        }

        serde_json::from_slice::<T>(&self.body).map_err(|e| {
            let raw_response = self.text();
            tracing::error!(
                error = %e,
                raw_response = %raw_response,
                "Failed to deserialize response"
            );

            Error::DeserializationFailed {
                raw_response,
                serde_error: e.to_string(),
                status: self.status,
            }
        })
    }

    /// Accepts any 2xx response and discards the body.
    pub fn ensure_success(self) -> Result<()> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(self.into_api_error())
        }
    }

    fn into_api_error(self) -> Error {
        tracing::warn!(
            status = self.status.as_u16(),
            response = %self.text(),
            "Customer.io API returned an error"
        );

        Error::Api(ApiError::from_body(self.status, &self.body))
    }
}

/// Reads an explicit JSON `null` as the field type's default value.
///
/// Pair with `#[serde(default)]` so absent keys and `null` decode the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
