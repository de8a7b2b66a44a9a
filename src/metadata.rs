//! Per-request metadata: method, endpoint path, extra headers and query parameters.

use http::{header, HeaderMap, HeaderValue, Method};

/// Metadata for an individual TrueCoach request.
///
/// The path is held as raw segments; [`crate::config::ClientConfig::endpoint`]
/// encodes them when the URL is built.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// Path segments relative to the base URL.
    pub segments: Vec<String>,

    /// Headers added on top of the client's static headers.
    pub headers: HeaderMap,

    /// Query parameters, in the order they were added.
    pub query_params: Vec<(String, String)>,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and path segments.
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            headers: HeaderMap::new(),
            query_params: Vec::new(),
        }
    }

    /// Returns the path as it appears in logs, e.g. `/users/42`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Adds an `Authorization: Bearer <token>` header.
    ///
    /// The token is used verbatim and the header is marked sensitive so it is
    /// kept out of `Debug` output.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters that are not legal
    /// in a header value.
    pub fn with_bearer(mut self, access_token: &str) -> Result<Self, crate::Error> {
        let mut value = HeaderValue::try_from(format!("Bearer {}", access_token)).map_err(|_| {
            crate::Error::ConfigurationError(
                "Access token is not a valid header value".to_string(),
            )
        })?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }
}
