//! Main BackendClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use crate::error::ApiError;
use crate::error::Error;

/// The client for the managed data API.
///
/// Speaks the PostgREST dialect under `{url}/rest/v1` and the storage API
/// under `{url}/storage/v1`. Cheap to clone (uses `Arc` internally) and safe
/// to share across tasks.
///
/// # Example
///
/// ```ignore
/// use ventures_lib::BackendClient;
///
/// let client = BackendClient::builder()
///     .url("https://project.example.co")
///     .api_key("anon-key")
///     .build()?;
///
/// let events = client.fetch(&Query::from("events")).await?;
/// ```
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> BackendClientBuilder<Missing, Missing> {
        BackendClientBuilder::new()
    }

    /// Returns the base URL of the project.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds a URL for a collection under the REST endpoint.
    pub(crate) fn rest_url(&self, collection: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.inner.base_url, collection)
        } else {
            format!("{}/rest/v1/{}?{}", self.inner.base_url, collection, query)
        }
    }

    /// Builds a URL under the storage endpoint.
    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.inner.base_url, path)
    }

    pub(crate) fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers
    }

    /// Makes an HTTP request and maps non-success statuses to [`ApiError::Http`].
    ///
    /// There is no retry: a failed request fails the calling operation.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, Error> {
        let response = self.send(method.clone(), url, headers, body).await?;
        let status = response.status();

        if status.is_success() {
            log::debug!("{} {} -> {}", method, url, status.as_u16());
            Ok(response)
        } else {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} {} -> {}", method, url, status_code);
            Err(Error::Api(ApiError::from_body(status_code, &body)))
        }
    }

    /// Sends a request without interpreting the status.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, Error> {
        let bearer = self
            .inner
            .access_token
            .as_deref()
            .unwrap_or(&self.inner.api_key);

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(headers)
            .header("apikey", &self.inner.api_key)
            .bearer_auth(bearer);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let timeout = self.inner.timeout;
        request.send().await.map_err(|e| match timeout {
            Some(timeout) if e.is_timeout() => Error::Api(ApiError::Timeout(timeout)),
            _ => Error::Api(ApiError::from(e)),
        })
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`BackendClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The project URL
/// - `api_key` - The project's API key
pub struct BackendClientBuilder<Url, Key> {
    url: Url,
    api_key: Key,
    access_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl BackendClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            api_key: Missing,
            access_token: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for BackendClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> BackendClientBuilder<Missing, K> {
    /// Sets the project URL.
    pub fn url(self, url: impl Into<String>) -> BackendClientBuilder<Set<String>, K> {
        BackendClientBuilder {
            url: Set(url.into()),
            api_key: self.api_key,
            access_token: self.access_token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> BackendClientBuilder<U, Missing> {
    /// Sets the project's API key.
    pub fn api_key(self, key: impl Into<String>) -> BackendClientBuilder<U, Set<String>> {
        BackendClientBuilder {
            url: self.url,
            api_key: Set(key.into()),
            access_token: self.access_token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, K> BackendClientBuilder<U, K> {
    /// Sets a user access token sent as the bearer instead of the API key.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl BackendClientBuilder<Set<String>, Set<String>> {
    /// Builds the [`BackendClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<BackendClient, ApiError> {
        let url = url::Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.url.0,
                url.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(BackendClient {
            inner: Arc::new(BackendClientInner {
                base_url: self.url.0.trim_end_matches('/').to_string(),
                api_key: self.api_key.0,
                access_token: self.access_token,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
