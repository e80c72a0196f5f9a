//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (CAMPUS_CHAT_*)
//! 2. TOML config file (if CAMPUS_CHAT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the scraped university site.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Plain-fetch request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Freshness window for cached resources, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Whether the headless-browser fetch strategy is attempted first.
    #[serde(default)]
    pub render_enabled: bool,

    /// Explicit Chrome/Chromium executable for rendered fetches.
    ///
    /// When unset the browser is discovered on PATH.
    #[serde(default)]
    pub browser_path: Option<PathBuf>,

    /// Path to the FAQ JSON file.
    #[serde(default = "default_faq_path")]
    pub faq_path: PathBuf,

    /// API key for the optional enrichment collaborator.
    ///
    /// Enrichment is enabled purely by the presence of this credential.
    #[serde(default)]
    pub enrichment_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible enrichment endpoint.
    #[serde(default = "default_enrichment_endpoint")]
    pub enrichment_endpoint: String,

    /// Model name sent with enrichment requests.
    #[serde(default = "default_enrichment_model")]
    pub enrichment_model: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_base_url() -> String {
    "https://www.medicaps.ac.in".into()
}

fn default_user_agent() -> String {
    "campus-chat/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_faq_path() -> PathBuf {
    PathBuf::from("./faqs.json")
}

fn default_enrichment_endpoint() -> String {
    "https://api.openai.com".into()
}

fn default_enrichment_model() -> String {
    "gpt-4o-mini".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            cache_ttl_secs: default_cache_ttl_secs(),
            render_enabled: false,
            browser_path: None,
            faq_path: default_faq_path(),
            enrichment_api_key: None,
            enrichment_endpoint: default_enrichment_endpoint(),
            enrichment_model: default_enrichment_model(),
        }
    }
}

impl AppConfig {
    /// Plain-fetch timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache freshness window as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// The scraped site's base URL, parsed.
    pub fn site_base(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or validation fails
    /// after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CAMPUS_CHAT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("CAMPUS_CHAT_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.base_url, "https://www.medicaps.ac.in");
        assert_eq!(config.user_agent, "campus-chat/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(!config.render_enabled);
        assert!(config.browser_path.is_none());
        assert!(config.enrichment_api_key.is_none());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_site_base_parses() {
        let config = AppConfig::default();
        let base = config.site_base().unwrap();
        assert_eq!(base.scheme(), "https");
        assert_eq!(base.host_str(), Some("www.medicaps.ac.in"));
    }

    #[test]
    fn test_site_base_invalid() {
        let config = AppConfig { base_url: "not a url".into(), ..Default::default() };
        assert!(matches!(config.site_base(), Err(ConfigError::Invalid { .. })));
    }
}
