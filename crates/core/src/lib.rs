//! Core types and shared functionality for campus-chat.
//!
//! This crate provides:
//! - In-memory TTL cache for scraped content
//! - FAQ table and intent classification
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod faq;
pub mod intent;
pub mod types;

pub use cache::TtlCache;
pub use config::AppConfig;
pub use error::Error;
pub use faq::FaqTable;
pub use intent::{Intent, classify};
pub use types::{PageContent, ResourceName};
