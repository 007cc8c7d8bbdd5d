//! Request metadata: method and escaped request path.

use http::Method;

/// Metadata for an individual API request.
///
/// Paths are assembled from fixed prefixes and caller-supplied identifiers.
/// Identifiers are percent-encoded as they are pushed, so a value such as
/// `"a/b"` stays a single path segment (`a%2Fb`).
///
/// # Examples
///
/// ```
/// use customerio::metadata::RequestMetadata;
/// use http::Method;
///
/// let metadata = RequestMetadata::new(Method::PUT, "/v1/collections").segment("sales/2024");
/// assert_eq!(metadata.path, "/v1/collections/sales%2F2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path, relative to the client's base URL.
    pub path: String,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and path prefix.
    ///
    /// The prefix is used as-is and is not escaped.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Appends a percent-encoded path segment.
    pub fn segment(mut self, value: impl AsRef<str>) -> Self {
        self.path.push('/');
        self.path.push_str(&urlencoding::encode(value.as_ref()));
        self
    }

    /// Appends a literal path segment. Use for fixed route components only.
    pub fn literal(mut self, value: &str) -> Self {
        self.path.push('/');
        self.path.push_str(value);
        self
    }
}
