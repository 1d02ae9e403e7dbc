//! HTTP transport with a hard wall-clock bound on every request

use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use tsci_core::error::TsciError;
use crate::RegistryResult;

/// Default request timeout (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent sent to the registry
pub const DEFAULT_USER_AGENT: &str = concat!("tsci-registry/", env!("CARGO_PKG_VERSION"));

/// Per-call request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Request body, sent as-is
    pub body: Option<Vec<u8>>,
    /// Headers that override the client defaults
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// A plain GET
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// A POST carrying a JSON body
    pub fn post_json<B: Serialize>(body: &B) -> RegistryResult<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| TsciError::Upstream {
            message: format!("Failed to encode request body: {}", e),
            status: None,
        })?;
        Ok(Self {
            method: Method::POST,
            body: Some(bytes),
            headers: HeaderMap::new(),
        })
    }

    /// Override or add one header
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// A completed HTTP exchange.
///
/// Error statuses are not failures here; `ok` is false and the caller decides.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: StatusCode,
    /// True for 2xx statuses
    pub ok: bool,
    pub body: String,
}

impl RawResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        serde_json::from_str(&self.body).map_err(|e| TsciError::Upstream {
            message: format!("Invalid JSON from {}: {}", self.url, e),
            status: Some(self.status.as_u16()),
        })
    }

    /// "404 Not Found" style status line
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}

/// HTTP client whose requests are cancelled once their timeout elapses
#[derive(Debug, Clone)]
pub struct BoundedHttpClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Timeout used by `send`
    default_timeout: Duration,
}

impl BoundedHttpClient {
    /// Create client with the default user agent and timeout
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Create client with a custom user agent and default timeout
    pub fn with_config(user_agent: &str, default_timeout: Duration) -> RegistryResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| TsciError::ConfigValidation {
                field: "user-agent".to_string(),
                reason: format!("Invalid user agent '{}': {}", user_agent, e),
            })?,
        );

        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(|e| TsciError::transport(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            default_timeout,
        })
    }

    /// Timeout used by `send`
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Issue a request bounded by the client's default timeout
    pub async fn send(&self, url: &str, options: RequestOptions) -> RegistryResult<RawResponse> {
        self.request(url, options, self.default_timeout).await
    }

    /// Issue a request and read its body, all within `timeout`.
    ///
    /// When the timeout fires the in-flight future is dropped, which aborts
    /// the connection, and `TsciError::Timeout` is returned.
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
        timeout: Duration,
    ) -> RegistryResult<RawResponse> {
        debug!("{} {} (timeout {:?})", options.method, url, timeout);

        let mut builder = self.client.request(options.method, url).headers(options.headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok((status, body))) => {
                if !status.is_success() {
                    debug!("{} answered {}", url, status);
                }
                Ok(RawResponse {
                    url: url.to_string(),
                    status,
                    ok: status.is_success(),
                    body,
                })
            }
            Ok(Err(e)) if e.is_timeout() => Err(Self::timeout_error(url, timeout)),
            Ok(Err(e)) => Err(TsciError::transport(format!("Request to {} failed: {}", url, e), e)),
            Err(_) => Err(Self::timeout_error(url, timeout)),
        }
    }

    fn timeout_error(url: &str, timeout: Duration) -> TsciError {
        warn!("Request to {} timed out after {:?}", url, timeout);
        TsciError::Timeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}
