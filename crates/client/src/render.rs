//! Headless browser fetch strategy for JS-heavy pages.
//!
//! The browser is a scoped resource: each `fetch` call launches its own
//! isolated instance and unconditionally releases it on every exit path, so
//! a failed navigation can never leak a Chrome process. No instance is shared
//! or pooled across calls.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::fetch::FetchStrategy;

/// Errors that can occur during page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to launch or connect to the browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to the URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to read the rendered document.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),
}

/// Options for rendered fetches.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Overall budget for waiting on wait-selectors (default: 12s).
    pub wait_budget: Duration,

    /// Bounded wait per individual selector (default: 3s).
    pub selector_wait: Duration,

    /// Fixed settle delay after the wait phase (default: 600ms).
    pub settle_delay: Duration,

    /// Viewport dimensions (default: 1280x800).
    pub viewport: (u32, u32),

    /// Explicit browser executable; discovered on PATH when unset.
    pub browser_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wait_budget: Duration::from_secs(12),
            selector_wait: Duration::from_secs(3),
            settle_delay: Duration::from_millis(600),
            viewport: (1280, 800),
            browser_path: None,
        }
    }
}

/// Headless Chrome/Chromium fetch strategy using chromiumoxide.
pub struct RenderedFetch {
    options: RenderOptions,
}

impl RenderedFetch {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    async fn launch(&self) -> Result<(chromiumoxide::Browser, tokio::task::JoinHandle<()>), RenderError> {
        use chromiumoxide::browser::{Browser, BrowserConfig};
        use futures_util::StreamExt;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(self.options.viewport.0, self.options.viewport.1)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &self.options.browser_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(RenderError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        Ok((browser, handle))
    }

    async fn render(
        &self, browser: &chromiumoxide::Browser, url: &Url, wait_for: &[&str],
    ) -> Result<String, RenderError> {
        let page = browser
            .new_page(url.as_str())
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        // Wait for the first selector that appears; a selector that never
        // shows up only burns its own slice of the budget before the next
        // one is tried.
        let overall = tokio::time::Instant::now() + self.options.wait_budget;
        'selectors: for selector in wait_for {
            let stop = (tokio::time::Instant::now() + self.options.selector_wait).min(overall);
            loop {
                if page.find_element(*selector).await.is_ok() {
                    break 'selectors;
                }
                if tokio::time::Instant::now() >= stop {
                    continue 'selectors;
                }
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
        }

        tokio::time::sleep(self.options.settle_delay).await;

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        page.close().await.ok();
        Ok(html)
    }
}

#[async_trait]
impl FetchStrategy for RenderedFetch {
    fn name(&self) -> &'static str {
        "rendered"
    }

    async fn fetch(&self, url: &Url, wait_for: &[&str]) -> Result<String, campus_core::Error> {
        let start = std::time::Instant::now();
        let (mut browser, handler) = self
            .launch()
            .await
            .map_err(|e| campus_core::Error::RenderFailed(e.to_string()))?;

        let result = self.render(&browser, url, wait_for).await;

        // Release the browser on every exit path, success or not.
        browser.close().await.ok();
        browser.wait().await.ok();
        handler.abort();

        match result {
            Ok(html) => {
                tracing::debug!(%url, render_ms = start.elapsed().as_millis() as u64, "rendered fetch complete");
                Ok(html)
            }
            Err(e) => Err(campus_core::Error::RenderFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_default() {
        let options = RenderOptions::default();
        assert_eq!(options.wait_budget, Duration::from_secs(12));
        assert_eq!(options.selector_wait, Duration::from_secs(3));
        assert_eq!(options.settle_delay, Duration::from_millis(600));
        assert_eq!(options.viewport, (1280, 800));
        assert!(options.browser_path.is_none());
    }

    #[tokio::test]
    #[ignore = "requires network and Chrome/Chromium"]
    async fn test_rendered_fetch_simple_page() {
        let strategy = RenderedFetch::new(RenderOptions::default());
        let url = Url::parse("https://example.com").unwrap();

        let html = strategy.fetch(&url, &["h1", "p"]).await.unwrap();
        assert!(html.contains("<html"));
    }
}
