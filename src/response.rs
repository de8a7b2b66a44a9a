//! Decoded response plus the HTTP details it arrived with.
//!
//! The public operations hand back only [`Response::data`]; the rest feeds
//! logging and tests.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful, decoded HTTP response.
#[derive(Debug, Clone)]
pub(crate) struct Response<T> {
    /// The deserialized response data.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

impl<T> Response<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// Used to unwrap the `{"user": ...}` and `{"response": ...}` envelopes.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}
