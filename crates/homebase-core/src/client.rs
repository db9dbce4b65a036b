//! HTTP client with rate limiting for homebase.no
//!
//! This module provides a rate-limited, cookie-bearing HTTP client. The
//! session cookie set by the login endpoint is kept in the client's cookie
//! store and sent with every later request. Failed requests are never retried.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::error::{HomebaseError, Result};

/// Base URL for the homebase.no customer pages
pub const HOMEBASE_BASE_URL: &str = "https://min.homebase.no";

/// User-Agent identifying this tool to the service
const DEFAULT_USER_AGENT: &str = "HomebaseTweaks - https://github.com/jokim/HomebaseTweaks";

/// Default Accept-Language header for Norwegian content
const DEFAULT_ACCEPT_LANGUAGE: &str = "nb-NO,nb;q=0.9,no;q=0.8,en;q=0.5";

/// Slowest accepted request rate: one request per 100 seconds
pub const MIN_REQUESTS_PER_SECOND: f64 = 0.01;

/// Interval between requests for a rate, rejecting rates below
/// [`MIN_REQUESTS_PER_SECOND`] and non-finite values.
pub fn request_interval(requests_per_second: f64) -> Result<Duration> {
    if !requests_per_second.is_finite() || requests_per_second < MIN_REQUESTS_PER_SECOND {
        return Err(HomebaseError::Config(format!(
            "requests_per_second must be a number of at least {}, got {}",
            MIN_REQUESTS_PER_SECOND, requests_per_second
        )));
    }
    Ok(Duration::from_secs_f64(1.0 / requests_per_second))
}

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart
/// to avoid hammering the service while paging through the guide.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Errors
    /// `HomebaseError::Config` when the rate is below
    /// [`MIN_REQUESTS_PER_SECOND`] or not finite.
    ///
    /// # Example
    /// ```
    /// use homebase_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0).unwrap(); // 2 requests per second
    /// assert!(RateLimiter::new(1e-30).is_err());
    /// ```
    pub fn new(requests_per_second: f64) -> Result<Self> {
        let min_interval = request_interval(requests_per_second)?;
        let start = Instant::now()
            .checked_sub(min_interval)
            .unwrap_or_else(Instant::now);
        Ok(Self {
            min_interval,
            last_request: Arc::new(Mutex::new(start)),
        })
    }

    /// Wait until the minimum interval since the previous request has passed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the homebase HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the service (default: `https://min.homebase.no`)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: HOMEBASE_BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// A fetched page: the final URL after redirects and the decoded body
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// HTTP client for homebase.no with a cookie store and rate limiting
pub struct HomebaseClient {
    /// Underlying HTTP client, owns the cookie jar
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
    /// Base URL without trailing slash
    base_url: String,
}

impl HomebaseClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `HomebaseError::InvalidUrl` - base URL is not http(s)
    /// - `HomebaseError::Config` - request rate below [`MIN_REQUESTS_PER_SECOND`]
    /// - `HomebaseError::HttpError` - the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(HomebaseError::InvalidUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second)?,
            base_url,
        })
    }

    /// Build an absolute URL from a path relative to the service root
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path (with optional query string) on the service
    ///
    /// # Errors
    /// - `HomebaseError::HttpError` - network or HTTP error
    /// - `HomebaseError::NotFound` - server returned 404
    pub async fn get(&self, path: &str) -> Result<Page> {
        self.rate_limiter.acquire().await;
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::into_page(response, &url).await
    }

    /// POST a form-encoded body to a path on the service
    ///
    /// # Errors
    /// - `HomebaseError::HttpError` - network or HTTP error
    /// - `HomebaseError::NotFound` - server returned 404
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Page> {
        self.rate_limiter.acquire().await;
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).form(fields).send().await?;
        Self::into_page(response, &url).await
    }

    async fn into_page(response: reqwest::Response, requested: &str) -> Result<Page> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HomebaseError::NotFound(requested.to_string()));
        }

        let response = response.error_for_status()?;
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(Page { url, body })
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(4.0).unwrap();
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rate_limiter_rejects_out_of_range_rates() {
        for rate in [0.0, -1.0, 1e-30, 0.009, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(RateLimiter::new(rate), Err(HomebaseError::Config(_))),
                "rate {} should be rejected",
                rate
            );
        }
        let slowest = RateLimiter::new(MIN_REQUESTS_PER_SECOND).unwrap();
        assert_eq!(slowest.min_interval(), Duration::from_secs(100));
    }

    #[test]
    fn test_client_rejects_tiny_rate() {
        let config = ClientConfig {
            requests_per_second: 1e-30,
            ..ClientConfig::default()
        };
        assert!(matches!(
            HomebaseClient::with_config(config),
            Err(HomebaseError::Config(_))
        ));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://min.homebase.no");
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = HomebaseClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080/".to_string(),
            requests_per_second: 10.0,
            timeout_secs: 5,
        };
        let client = HomebaseClient::with_config(config).unwrap();
        assert_eq!(client.url("/login.php"), "http://127.0.0.1:8080/login.php");
        assert_eq!(
            client.rate_limiter().min_interval(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_client_rejects_non_http_base_url() {
        let config = ClientConfig {
            base_url: "min.homebase.no".to_string(),
            ..ClientConfig::default()
        };
        match HomebaseClient::with_config(config) {
            Err(HomebaseError::InvalidUrl(url)) => assert_eq!(url, "min.homebase.no"),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0).unwrap(); // 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
