//! Cache-backed content acquisition.
//!
//! `ContentService` wires the ordered fetch strategies, the extractor, and
//! the TTL cache together. Strategies are tried in the order given at
//! construction; when rendering is enabled it sits first and plain fetch is
//! the one fallback hop. A scrape that fails on every strategy surfaces as a
//! single [`Error::FetchFailed`], which the cache answers with a stale entry
//! when it still holds one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use campus_core::{Error, PageContent, ResourceName, TtlCache};
use url::Url;

use crate::extract::extract;
use crate::fetch::FetchStrategy;
use crate::resources::{ResourceSpec, spec_for};

/// Read access to the named resources, fresh or cached.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn resource(&self, name: ResourceName) -> Result<Arc<PageContent>, Error>;
}

pub struct ContentService {
    strategies: Vec<Arc<dyn FetchStrategy>>,
    cache: TtlCache<ResourceName, PageContent>,
    base_url: Url,
}

impl ContentService {
    pub fn new(strategies: Vec<Arc<dyn FetchStrategy>>, base_url: Url, ttl: Duration) -> Self {
        Self { strategies, cache: TtlCache::new(ttl), base_url }
    }

    /// Fetch and extract one resource, bypassing the cache.
    pub async fn scrape(&self, spec: &ResourceSpec) -> Result<PageContent, Error> {
        let url = spec.url(&self.base_url)?;
        let html = self.fetch_html(&url, spec.wait_selectors).await?;
        let extraction = extract(&html, &spec.rules);

        if extraction.summary.is_empty() && extraction.rows.is_empty() {
            tracing::debug!(resource = %spec.name, %url, "no recognizable content extracted");
        }

        Ok(PageContent::new(extraction.summary, extraction.rows))
    }

    async fn fetch_html(&self, url: &Url, wait_for: &[&str]) -> Result<String, Error> {
        let mut last_error = Error::FetchFailed(format!("no fetch strategies configured for {url}"));

        for strategy in &self.strategies {
            match strategy.fetch(url, wait_for).await {
                Ok(html) => return Ok(html),
                Err(err) => {
                    tracing::warn!(strategy = strategy.name(), %url, %err, "fetch strategy failed");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl ContentSource for ContentService {
    async fn resource(&self, name: ResourceName) -> Result<Arc<PageContent>, Error> {
        let spec = spec_for(name);
        self.cache
            .get_or_refresh(name, || async { self.scrape(&spec).await })
            .await
    }
}
