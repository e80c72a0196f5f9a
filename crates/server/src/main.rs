//! campus-chat server entry point.
//!
//! Boots the HTTP server: loads configuration, the FAQ table, and the content
//! pipeline, then serves the chat and resource endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use campus_core::{AppConfig, FaqTable};
use campus_client::{ContentService, EnrichConfig, Enricher, FetchConfig, FetchStrategy, PlainFetch};

mod compose;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::load()?;
    let faqs = FaqTable::load(&config.faq_path)?;
    tracing::info!(entries = faqs.len(), path = %config.faq_path.display(), "loaded FAQ table");

    let content = Arc::new(ContentService::new(
        build_strategies(&config)?,
        config.site_base()?,
        config.ttl(),
    ));

    let enricher = config
        .enrichment_api_key
        .as_ref()
        .and_then(|key| {
            Enricher::new(EnrichConfig {
                endpoint: config.enrichment_endpoint.clone(),
                api_key: key.clone(),
                model: config.enrichment_model.clone(),
                timeout: Duration::from_secs(20),
            })
        })
        .map(Arc::new);
    if enricher.is_some() {
        tracing::info!(model = %config.enrichment_model, "enrichment enabled");
    }

    let state = routes::AppState { content, faqs: Arc::new(faqs), enricher };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "campus-chat listening");
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}

/// Rendered fetch first when enabled, plain fetch as the fallback hop.
fn build_strategies(config: &AppConfig) -> Result<Vec<Arc<dyn FetchStrategy>>> {
    let mut strategies: Vec<Arc<dyn FetchStrategy>> = Vec::new();

    #[cfg(feature = "render")]
    if config.render_enabled {
        strategies.push(Arc::new(campus_client::RenderedFetch::new(campus_client::RenderOptions {
            browser_path: config.browser_path.clone(),
            ..Default::default()
        })));
        tracing::info!("rendered fetch enabled");
    }
    #[cfg(not(feature = "render"))]
    if config.render_enabled {
        tracing::warn!("render_enabled is set but this build has no render support");
    }

    strategies.push(Arc::new(PlainFetch::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
        max_bytes: config.max_bytes,
        ..Default::default()
    })?));

    Ok(strategies)
}
