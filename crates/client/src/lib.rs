//! Content acquisition pipeline for campus-chat.
//!
//! This crate provides the fetch strategies (plain HTTP and feature-gated
//! headless-browser rendering), the heuristic HTML extractor, the per-resource
//! scrape bindings, and the cache-backed content service shared by the server.

pub mod enrich;
pub mod extract;
pub mod fetch;
#[cfg(feature = "render")]
pub mod render;
pub mod resources;
pub mod service;

pub use enrich::{EnrichConfig, Enricher};
pub use extract::{ExtractRules, Extraction, PairingMode, extract};
pub use fetch::{FetchConfig, FetchStrategy, PlainFetch};
#[cfg(feature = "render")]
pub use render::{RenderOptions, RenderedFetch};
pub use resources::{ResourceSpec, spec_for};
pub use service::{ContentService, ContentSource};
