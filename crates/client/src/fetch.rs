//! Fetch strategies for page markup.
//!
//! Two interchangeable implementations sit behind [`FetchStrategy`]: the
//! plain HTTP client defined here and, behind the `render` feature, the
//! headless-browser strategy in [`crate::render`]. The content service tries
//! them in order; rendering is the higher-cost, higher-fidelity option
//! attempted first when enabled, and plain fetch is the one fallback hop.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use campus_core::Error;
use reqwest::{Client, header};
use url::Url;

/// One way of turning a URL into page markup.
///
/// Strategies convert every lower-level failure into a uniform [`Error`];
/// nothing here is retried internally or fatal to the process.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Strategy name, used in fallback logs.
    fn name(&self) -> &'static str;

    /// Retrieve the page markup for `url`.
    ///
    /// `wait_for` is an ordered list of CSS selectors a rendering strategy
    /// should wait on before reading the document; the plain strategy
    /// ignores it.
    async fn fetch(&self, url: &Url, wait_for: &[&str]) -> Result<String, Error>;
}

/// Configuration for the plain fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "campus-chat/0.1")
    pub user_agent: String,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "campus-chat/0.1".to_string(),
            timeout: Duration::from_millis(10_000),
            max_bytes: 5 * 1024 * 1024,
            max_redirects: 5,
        }
    }
}

/// Plain HTTP fetch: one bounded-timeout GET, no rendering.
pub struct PlainFetch {
    http: Client,
    config: FetchConfig,
}

impl PlainFetch {
    /// Create a new plain fetch strategy with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl FetchStrategy for PlainFetch {
    fn name(&self) -> &'static str {
        "plain"
    }

    async fn fetch(&self, url: &Url, _wait_for: &[&str]) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::TooLarge(len as usize));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {e}")))?;

        if body.len() > self.config.max_bytes {
            return Err(Error::TooLarge(body.len()));
        }

        tracing::debug!(
            %url,
            fetch_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "plain fetch complete"
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, "campus-chat/0.1");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_plain_fetch_new() {
        let strategy = PlainFetch::new(FetchConfig::default());
        assert!(strategy.is_ok());
        assert_eq!(strategy.unwrap().name(), "plain");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_http_error() {
        let strategy = PlainFetch::new(FetchConfig {
            timeout: Duration::from_millis(500),
            ..Default::default()
        })
        .unwrap();
        let url = Url::parse("http://127.0.0.1:59999/placements").unwrap();

        let result = strategy.fetch(&url, &[]).await;
        assert!(matches!(result, Err(Error::HttpError(_))));
    }
}
