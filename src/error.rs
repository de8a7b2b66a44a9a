//! Error types for TrueCoach API calls.
//!
//! The taxonomy is deliberately flat: transport failures, decode failures and
//! non-2xx responses. Remote application errors (bad credentials, missing
//! resources) are all reported as [`Error::HttpError`] and are not classified
//! any further.

use http::{HeaderMap, StatusCode};

/// The main error type for TrueCoach API calls.
///
/// # Examples
///
/// ```no_run
/// use truecoach::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.login("you@example.com", "secret").await {
///     Ok(token) => println!("Logged in as user {}", token.user_id),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("HTTP error {}: {}", status, raw_response);
///     }
///     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
///         eprintln!("Unexpected response shape: {}", serde_error);
///         eprintln!("Raw response: {}", raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, TLS, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The transport gave up waiting for the server.
    #[error("Request timed out")]
    Timeout,

    /// The response body did not match the expected shape.
    ///
    /// This also covers a flexible identifier that was neither a JSON string
    /// nor a JSON number; `serde_error` names the kind that was found.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The server returned a non-2xx HTTP status code.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// Invalid configuration was provided, such as an illegal header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Builds the transport error for a failed `reqwest` send.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }

    /// Returns `true` for connectivity, DNS, TLS and timeout failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use truecoach::Error;
    ///
    /// assert!(Error::Timeout.is_transport());
    /// assert!(!Error::ConfigurationError("bad header".to_string()).is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout)
    }

    /// Returns `true` if the response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::DeserializationFailed { .. })
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for TrueCoach API calls.
pub type Result<T> = std::result::Result<T, Error>;
