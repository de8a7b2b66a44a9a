//! Fixed connection settings for the TrueCoach API.
//!
//! [`ClientConfig`] is assembled once by [`crate::ClientBuilder`] and shared,
//! read-only, by every request the client makes.

use crate::{Error, Result};
use http::{header, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// Base URL of the TrueCoach REST API.
pub const API_BASE_URL: &str = "https://api.truecoach.co/api";

/// User agent of the mobile HTTP stack the API expects.
pub const USER_AGENT: &str = "okhttp/4.12.0";

/// Media type the client asks the API to respond with.
pub const ACCEPT: &str = "application/json";

/// Media type of request bodies.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Value of the `Role` header; this client always acts as a coachee.
pub const ROLE: &str = "Client";

/// Response compression the client accepts.
pub const ACCEPT_ENCODING: &str = "gzip";

/// Immutable configuration attached to a [`crate::Client`] at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to.
    pub base_url: Url,

    /// Headers sent with every request.
    pub headers: HeaderMap,

    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with the standard headers and no timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: Self::default_headers(),
            timeout: None,
        }
    }

    /// Returns the static headers every TrueCoach request carries.
    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
        headers.insert(HeaderName::from_static("role"), HeaderValue::from_static(ROLE));
        headers.insert(
            header::ACCEPT_ENCODING,
            HeaderValue::from_static(ACCEPT_ENCODING),
        );
        headers
    }

    /// Resolves an endpoint from path segments, keeping any path prefix of the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers can never escape their
    /// position in the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path (e.g. `mailto:`).
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::ConfigurationError(format!(
                    "Base URL cannot be used as a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments.iter().map(|segment| segment.as_ref()));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_config() -> ClientConfig {
        ClientConfig::new(Url::parse(API_BASE_URL).unwrap())
    }

    #[test]
    fn test_default_headers() {
        let headers = ClientConfig::default_headers();

        assert_eq!(headers.len(), 5);
        assert_eq!(headers["user-agent"], "okhttp/4.12.0");
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["content-type"], "application/json; charset=utf-8");
        assert_eq!(headers["role"], "Client");
        assert_eq!(headers["accept-encoding"], "gzip");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = api_config();
        let url = config.endpoint(&["users", "42"]).unwrap();
        assert_eq!(url.as_str(), "https://api.truecoach.co/api/users/42");
    }

    #[test]
    fn test_endpoint_with_bare_host() {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:8080").unwrap());
        let url = config
            .endpoint(&["clients", "77", "habit_trackers"])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/clients/77/habit_trackers");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let config = api_config();
        let url = config.endpoint(&["users", "1/../admin"]).unwrap();
        assert_eq!(url.path(), "/api/users/1%2F..%2Fadmin");
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_a_base() {
        let config = ClientConfig::new(Url::parse("mailto:coach@example.com").unwrap());
        assert!(matches!(
            config.endpoint(&["users"]),
            Err(Error::ConfigurationError(_))
        ));
    }
}
