//! REST API client

use std::sync::Arc;
use std::time::Duration;

pub use reqwest::Method;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;

/// Client for the back-office REST API.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use backoffice_lib::ApiClient;
///
/// let client = ApiClient::builder()
///     .url("https://shop.example.com/api/")
///     .token("secret")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let orders: Vec<Record> = client.get_json("orders").await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: Url,
    token: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl ApiClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ApiClientBuilder<Missing> {
        ApiClientBuilder::new()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve a path relative to the base URL.
    ///
    /// Leading slashes are ignored so `"/orders"` and `"orders"` both land
    /// under the base path.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self.inner.http_client.request(method, url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> ApiError {
        match (err.is_timeout(), self.inner.timeout) {
            (true, Some(timeout)) => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }

    async fn parse<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }

    /// `GET` a path and parse the JSON response.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.url(path)?;
        log::debug!("GET {}", url);
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::parse(response).await
    }

    /// Send a JSON body and parse the JSON response, if there is one.
    ///
    /// Returns `None` for an empty body (e.g. `204 No Content`).
    pub async fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        log::debug!("{} {}", method, url);
        let response = self.send(self.request(method, url).json(body)).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), text))
    }

    /// `POST` a JSON body and parse the JSON response.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self
            .send_json(Method::POST, path, body)
            .await?
            .ok_or_else(|| ApiError::parse("empty response body"))?;
        serde_json::from_value(value).map_err(|e| ApiError::parse(e.to_string()))
    }

    /// `DELETE` a path, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        log::debug!("DELETE {}", url);
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ApiClient`].
///
/// The base URL is required and checked at compile time; everything else is
/// optional.
pub struct ApiClientBuilder<U> {
    url: U,
    token: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ApiClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> ApiClientBuilder<Set<String>> {
        ApiClientBuilder {
            url: Set(url.into()),
            token: self.token,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ApiClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ApiClientBuilder<U> {
    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ApiClientBuilder<Set<String>> {
    /// Builds the client.
    ///
    /// The base URL always ends with `/` so relative paths resolve under it.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let Set(raw) = self.url;
        let mut normalized = raw.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                raw,
                base_url.scheme()
            )));
        }

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url,
                token: self.token,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_under_base() {
        let client = ApiClient::builder()
            .url("https://shop.test/api/v1")
            .build()
            .unwrap();
        assert_eq!(
            client.url("/orders").unwrap().as_str(),
            "https://shop.test/api/v1/orders"
        );
        assert_eq!(
            client.url("orders/42").unwrap().as_str(),
            "https://shop.test/api/v1/orders/42"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ApiClient::builder().url("not a url").build(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::builder().url("ftp://shop.test").build(),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
