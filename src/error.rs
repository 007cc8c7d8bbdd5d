//! Error types for Customer.io API calls.
//!
//! Every failure surfaces through [`Error`]. Non-success HTTP responses are
//! normalized into an [`ApiError`] no matter which endpoint family produced
//! them, so callers can match on one shape for the core, App and Track APIs.

use crate::response::null_as_default;
use http::StatusCode;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// The main error type for Customer.io API calls.
///
/// # Examples
///
/// ```no_run
/// use customerio::{ApiClient, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = ApiClient::new("app-api-key")?;
///
/// match client.list_collections().await {
///     Ok(response) => println!("{} collections", response.collections.len()),
///     Err(Error::Api(api)) => {
///         eprintln!("API error {}: {}", api.status, api.message());
///     }
///     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
///         eprintln!("Unexpected body {}: {}", raw_response, serde_error);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    ///
    /// This wraps the underlying `reqwest::Error`. Timeouts configured on a
    /// custom transport also land here.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// A successful response body did not match the expected shape.
    ///
    /// The raw body is preserved so schema drift can be diagnosed in production.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The API answered with a non-success status code.
    ///
    /// The display output is exactly the message reported by the API, or the
    /// raw response body when the body carried no recognizable error envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required identifier was empty. No request was sent.
    #[error("{0}: missing param")]
    MissingParam(&'static str),

    /// A transactional attachment with this name was already added.
    #[error("attachment with this name already exists: {0}")]
    AttachmentExists(String),

    /// Invalid configuration was provided, such as a header value that is
    /// not valid HTTP header text.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the normalized API error, if the server rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Customer.io API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// A non-success response from one of the Customer.io APIs.
///
/// Bodies are interpreted in this order:
///
/// 1. `{"errors": [{"detail": ..., "status": ...}, ...]}` with at least one entry.
/// 2. `{"meta": {"error": ...}}`, which becomes a single entry.
/// 3. Anything else becomes a single entry holding the raw body text.
///
/// # Examples
///
/// ```
/// use customerio::ApiError;
/// use http::StatusCode;
///
/// let err = ApiError::from_body(
///     StatusCode::UNPROCESSABLE_ENTITY,
///     br#"{"errors":[{"detail":"name is taken","status":"422"}]}"#,
/// );
/// assert_eq!(err.message(), "name is taken");
/// assert_eq!(err.errors[0].status, Some(422));
///
/// let err = ApiError::from_body(StatusCode::BAD_GATEWAY, b"upstream down");
/// assert_eq!(err.to_string(), "upstream down");
/// assert_eq!(err.errors[0].status, Some(502));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: StatusCode,
    /// Every error entry reported by the API. Never empty.
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    /// Normalizes a failed response body into an `ApiError`.
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        if let Ok(envelope) = serde_json::from_slice::<ErrorsEnvelope>(body) {
            if !envelope.errors.is_empty() {
                return Self {
                    status,
                    errors: envelope.errors,
                };
            }
        }

        if let Ok(envelope) = serde_json::from_slice::<MetaEnvelope>(body) {
            return Self::single(status, envelope.meta.error);
        }

        Self::single(status, String::from_utf8_lossy(body).into_owned())
    }

    fn single(status: StatusCode, detail: String) -> Self {
        Self {
            status,
            errors: vec![ErrorDetail {
                detail,
                status: Some(status.as_u16()),
                source: None,
            }],
        }
    }

    /// The first error detail reported by the API.
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.detail.as_str())
            .unwrap_or("error message undefined")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

/// One entry of an API error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable description of the problem.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: String,
    /// The status the API attached to this entry. Sent as a number by some
    /// endpoints and as a numeric string by others.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<u16>,
    /// The request field the entry refers to, if any.
    #[serde(default)]
    pub source: Option<ErrorSource>,
}

/// Points at the part of the request an [`ErrorDetail`] is about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer into the request body, e.g. `/data/attributes/name`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pointer: String,
}

#[derive(Deserialize)]
struct ErrorsEnvelope {
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct MetaEnvelope {
    meta: Meta,
}

#[derive(Deserialize)]
struct Meta {
    error: String,
}

fn lenient_status<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u16),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::Number(n)) => Some(n),
        Some(Wire::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_envelope_keeps_every_entry() {
        let body = br#"{"errors":[
            {"detail":"name is required","source":{"pointer":"/name"},"status":"400"},
            {"detail":"url is invalid","status":400}
        ]}"#;

        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.message(), "name is required");
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].status, Some(400));
        assert_eq!(err.errors[1].status, Some(400));
        assert_eq!(
            err.errors[0].source,
            Some(ErrorSource {
                pointer: "/name".to_string()
            })
        );
        assert_eq!(err.errors[1].source, None);
    }

    #[test]
    fn test_null_detail_keeps_envelope() {
        let body = br#"{"errors":[
            {"detail":null,"status":400,"source":{"pointer":null}},
            {"detail":"real"}
        ]}"#;

        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.message(), "");
        assert_eq!(err.errors[0].source.as_ref().unwrap().pointer, "");
        assert_eq!(err.errors[1].detail, "real");
    }

    #[test]
    fn test_meta_envelope() {
        let body = br#"{"meta":{"error":"missing transactional_message_id"}}"#;

        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.to_string(), "missing transactional_message_id");
        assert_eq!(err.errors[0].status, Some(400));
    }

    #[test]
    fn test_malformed_body_falls_back_to_raw_text() {
        let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");

        assert_eq!(err.message(), "<html>oops</html>");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.errors[0].status, Some(500));
    }

    #[test]
    fn test_empty_errors_list_falls_back_to_raw_text() {
        let err = ApiError::from_body(StatusCode::NOT_FOUND, br#"{"errors":[]}"#);

        assert_eq!(err.message(), r#"{"errors":[]}"#);
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_unparseable_status_is_none() {
        let body = br#"{"errors":[{"detail":"bad","status":"unknown"}]}"#;

        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.errors[0].status, None);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_display_and_accessors() {
        let err = Error::from(ApiError::from_body(StatusCode::FORBIDDEN, b"denied"));

        assert_eq!(err.to_string(), "denied");
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(err.api_error().is_some());

        let err = Error::MissingParam("customer_id");
        assert_eq!(err.to_string(), "customer_id: missing param");
        assert_eq!(err.status(), None);
    }
}
