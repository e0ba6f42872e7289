//! HTTP transport for source pages
//!
//! The extraction engine only needs "fetch document by URL with headers".
//! [`DocumentFetcher`] is that seam; [`HttpClient`] is the `reqwest`
//! implementation used in production and tests substitute their own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::config::HttpClientConfig;
use super::{ExtractionError, ExtractionResult};

/// One document request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// Per-request headers, applied on top of the client defaults
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// "Give me the markup behind this URL"
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the body of a successful response.
    ///
    /// Network failures and non-success statuses are [`ExtractionError::Fetch`].
    /// A successful but empty body is returned as-is; deciding whether it is a
    /// document is the parser's job.
    async fn fetch(&self, request: &FetchRequest) -> ExtractionResult<String>;
}

/// HTTP client with configured timeouts, user agent and optional retries
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn with_config(config: HttpClientConfig) -> ExtractionResult<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.insert(name, value);
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| ExtractionError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn fetch_once(&self, request: &FetchRequest) -> ExtractionResult<String> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            let (name, value) = parse_header(name, value)?;
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExtractionError::fetch(&request.url, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::fetch(
                &request.url,
                Some(status.as_u16()),
                format!("HTTP error {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ExtractionError::fetch(&request.url, Some(status.as_u16()), e.to_string()))
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch(&self, request: &FetchRequest) -> ExtractionResult<String> {
        info!("HTTP GET: {}", request.url);
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once(request).await {
                Ok(body) => {
                    debug!("Fetched {} bytes from {} on attempt {}", body.len(), request.url, attempt);
                    return Ok(body);
                }
                Err(e) if attempt < attempts && is_retryable(&e) => {
                    warn!("Attempt {}/{} failed for {}: {}", attempt, attempts, request.url, e);
                    // Exponential backoff
                    let delay = self.config.retry_base_delay_ms.saturating_mul(1 << (attempt - 1).min(6));
                    sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Fetch failed for {}: {}", request.url, e);
                    return Err(e);
                }
            }
        }
    }
}

fn is_retryable(error: &ExtractionError) -> bool {
    match error {
        ExtractionError::Fetch { status: None, .. } => true,
        ExtractionError::Fetch {
            status: Some(code), ..
        } => StatusCode::from_u16(*code).is_ok_and(|status| {
            matches!(
                status,
                StatusCode::REQUEST_TIMEOUT
                    | StatusCode::TOO_MANY_REQUESTS
                    | StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            )
        }),
        _ => false,
    }
}

fn parse_header(name: &str, value: &str) -> ExtractionResult<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ExtractionError::configuration(format!("Invalid header name '{name}': {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| ExtractionError::configuration(format!("Invalid header value for '{name}': {e}")))?;
    Ok((header_name, header_value))
}
