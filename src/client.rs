//! The TrueCoach API client.
//!
//! [`Client`] exposes the three operations of the API (login, user profile,
//! habit trackers). Each one is exactly one HTTP round trip: there are no
//! retries, no caching and no token refresh. Use [`ClientBuilder`] to point
//! the client somewhere other than the production API or to set a timeout.

use crate::{
    config::{ClientConfig, API_BASE_URL},
    metadata::RequestMetadata,
    models::{
        HabitTrackerEnvelope, HabitTrackerResponse, SessionToken, TokenRequest, UserProfile,
        UserProfileEnvelope,
    },
    response::Response,
    Error, Result,
};
use http::{HeaderName, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// A TrueCoach API client.
///
/// The client holds only immutable configuration and a connection pool, so it
/// is cheap to clone and safe to share between tasks.
///
/// # Examples
///
/// ```no_run
/// use truecoach::Client;
///
/// # async fn example() -> Result<(), truecoach::Error> {
/// let client = Client::new()?;
///
/// let token = client.login("you@example.com", "secret").await?;
/// let profile = client
///     .get_user_profile(&token.access_token, token.user_id.as_str())
///     .await?;
/// let habits = client
///     .get_habit_trackers(&token.access_token, profile.client_id.as_str(), "Feb 1, 2026")
///     .await?;
///
/// println!("{} tracking(s), is_previous={}", habits.trackings.len(), habits.is_previous);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a client for the production API with the standard headers.
    ///
    /// No network activity happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Exchanges an email and password for a session token.
    ///
    /// Sends `POST /oauth/token` with a JSON body holding exactly
    /// `grant_type=password`, `username` and `password`. The token is returned
    /// to the caller and not kept by the client.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx responses (including rejected credentials)
    /// and undecodable bodies are returned as-is.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionToken> {
        let metadata = RequestMetadata::new(Method::POST, ["oauth", "token"]);
        let body = TokenRequest::password(email, password);

        let response = self.send::<_, SessionToken>(metadata, Some(&body)).await?;
        tracing::info!(user_id = %response.data.user_id, "Logged in");
        Ok(response.into_data())
    }

    /// Fetches the profile of `user_id`, unwrapping the `{"user": ...}` envelope.
    ///
    /// The returned [`UserProfile::client_id`] is the identifier habit tracker
    /// requests are scoped by.
    pub async fn get_user_profile(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<UserProfile> {
        let metadata =
            RequestMetadata::new(Method::GET, ["users", user_id]).with_bearer(access_token)?;

        let response = self.send::<(), UserProfileEnvelope>(metadata, None).await?;
        Ok(response.map(|envelope| envelope.user).into_data())
    }

    /// Fetches the habit trackers of `client_id` for `date`.
    ///
    /// `date` is sent verbatim as the `date` query parameter; the API expects
    /// the `Feb 1, 2026` form produced by [`crate::tracker_date`]. The
    /// `{"response": ...}` envelope is unwrapped before returning.
    pub async fn get_habit_trackers(
        &self,
        access_token: &str,
        client_id: &str,
        date: &str,
    ) -> Result<HabitTrackerResponse> {
        let metadata = RequestMetadata::new(Method::GET, ["clients", client_id, "habit_trackers"])
            .with_bearer(access_token)?
            .with_query_param("date", date);

        let response = self.send::<(), HabitTrackerEnvelope>(metadata, None).await?;
        let response = response.map(|envelope| envelope.response);
        tracing::debug!(
            trackings = response.data.trackings.len(),
            is_previous = response.data.is_previous,
            "Fetched habit trackers"
        );
        Ok(response.into_data())
    }

    /// Performs one request and decodes the body. Failures are never retried.
    async fn send<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();

        let result = match self.execute_request(&metadata, body).await {
            Ok(response) => self.parse_response(response, start_time).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                tracing::debug!(
                    status = response.status.as_u16(),
                    bytes = response.raw_body.len(),
                    latency_ms = response.latency.as_millis(),
                    content_type = response.header("content-type").unwrap_or_default(),
                    "Decoded response"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %metadata.method,
                    path = %metadata.path(),
                    "Request failed"
                );
                Err(e)
            }
        }
    }

    /// Executes a single request attempt.
    async fn execute_request<Req>(
        &self,
        metadata: &RequestMetadata,
        body: Option<&Req>,
    ) -> Result<reqwest::Response>
    where
        Req: Serialize,
    {
        let config = &self.inner.config;
        let mut url = config.endpoint(&metadata.segments)?;

        if !metadata.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &metadata.query_params {
                pairs.append_pair(key, value);
            }
        }

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(metadata.method.clone(), url);

        for (name, value) in &config.headers {
            request = request.header(name, value);
        }

        for (name, value) in &metadata.headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        // Content-Type comes from the static headers.
        if let Some(body) = body {
            let json = serde_json::to_vec(body)
                .map_err(|e| Error::SerializationFailed(e.to_string()))?;
            request = request.body(json);
        }

        request.send().await.map_err(Error::from_transport)
    }

    /// Maps a non-2xx status to [`Error::HttpError`], otherwise decodes the body.
    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response,
                headers,
            });
        }

        let raw_body = response.text().await.map_err(Error::from_transport)?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                // The body may hold a token, so only its size is logged.
                tracing::error!(
                    error = %e,
                    bytes = raw_body.len(),
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// Starts from the production base URL and the standard TrueCoach headers.
///
/// # Examples
///
/// ```no_run
/// use truecoach::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), truecoach::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://staging.example.com/api")?
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: http::HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: ClientConfig::default_headers(),
            timeout: None,
        }
    }

    /// Overrides the base URL. Any path it carries is kept as a prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets a header sent with every request, replacing any standard header of
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(API_BASE_URL)?,
        };

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        let config = ClientConfig {
            base_url,
            headers: self.default_headers,
            timeout: self.timeout,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                config,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
