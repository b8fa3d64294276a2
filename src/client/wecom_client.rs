//! WeCom HTTP Client
//!
//! Provides the HTTP client wrapper shared by every WeCom API call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::StatusCode;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tower::Service;

use crate::api::common::WecomApiResponse;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::WecomError;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// WeCom API Client
///
/// Reusable, stateless HTTP client for calling WeCom APIs. Holds no
/// credentials and no token; those are passed per call.
#[derive(Clone)]
pub struct WecomClient {
    http: Client,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for WecomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WecomClient")
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl WecomClient {
    /// Create a new client builder
    pub fn builder() -> WecomClientBuilder {
        WecomClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Note: requests made through this client bypass the middleware pipeline.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    async fn execute<T>(&self, request: reqwest::Request) -> Result<T, WecomError>
    where
        T: DeserializeOwned + WecomApiResponse,
    {
        let path = request.url().path().to_string();
        let response = self.send_request(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("[Wecom] {} answered with HTTP {}", path, status);
            return Err(WecomError::HttpStatus { status });
        }

        let body = response.bytes().await?;
        let result: T = serde_json::from_slice(&body).map_err(|e| {
            debug!("[Wecom] {} returned an undecodable body: {}", path, e);
            WecomError::from(e)
        })?;

        if !result.is_success() {
            warn!(
                "[Wecom] {} failed with errcode={}: {}",
                path,
                result.errcode(),
                result.errmsg()
            );
        }
        result.check()?;

        Ok(result)
    }

    /// Make a GET request to WeCom API
    ///
    /// # Arguments
    /// * `path` - API endpoint path (e.g., "/cgi-bin/gettoken")
    /// * `query` - Query parameters, sent in the given order
    ///
    /// # Errors
    /// - `WecomError::Transport` when the request cannot be built or sent
    /// - `WecomError::HttpStatus` for any status other than 200
    /// - `WecomError::Decode` when the body is not the expected JSON
    /// - `WecomError::Api` when `errcode != 0`
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, WecomError>
    where
        T: DeserializeOwned + WecomApiResponse,
    {
        let request = self.http.get(self.url(path)).query(query).build()?;
        self.execute(request).await
    }

    /// Make a POST request with a JSON body to WeCom API
    ///
    /// Errors as for [`get`](Self::get).
    pub async fn post<T, B>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, WecomError>
    where
        T: DeserializeOwned + WecomApiResponse,
        B: serde::Serialize + ?Sized,
    {
        let request = self
            .http
            .post(self.url(path))
            .query(query)
            .json(body)
            .build()?;
        self.execute(request).await
    }

    /// Make a POST request with a `multipart/form-data` body to WeCom API
    ///
    /// Errors as for [`get`](Self::get).
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        form: reqwest::multipart::Form,
    ) -> Result<T, WecomError>
    where
        T: DeserializeOwned + WecomApiResponse,
    {
        let request = self
            .http
            .post(self.url(path))
            .query(query)
            .multipart(form)
            .build()?;
        self.execute(request).await
    }
}

impl Service<reqwest::Request> for WecomClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for WecomClient
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use wecom_sdk::client::WecomClient;
///
/// # fn main() -> Result<(), wecom_sdk::WecomError> {
/// let client = WecomClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// assert_eq!(client.base_url(), "https://qyapi.weixin.qq.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct WecomClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl WecomClientBuilder {
    /// Set the base URL for API calls
    ///
    /// Default: `<https://qyapi.weixin.qq.com>`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 3 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: unset (bounded by the total timeout)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Apply every field of a [`ClientConfig`]
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = Some(config.timeout());
        self.connect_timeout = config.connect_timeout();
        self
    }

    /// Build the WecomClient
    ///
    /// # Errors
    /// Returns `WecomError::Config` if the base URL is not http(s), and
    /// `WecomError::Transport` if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<WecomClient, WecomError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WecomError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let mut builder = Client::builder().timeout(timeout);
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http = builder.build()?;

        Ok(WecomClient {
            http,
            base_url,
            middleware_executor: None,
        })
    }
}
