//! Shared data types for scraped content.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the fixed named content categories backing both the chat intents
/// and the direct `/api/*` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceName {
    Placements,
    Admissions,
    About,
}

impl ResourceName {
    pub const ALL: [ResourceName; 3] = [ResourceName::Placements, ResourceName::Admissions, ResourceName::About];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceName::Placements => "placements",
            ResourceName::Admissions => "admissions",
            ResourceName::About => "about",
        }
    }

    /// Human-readable category name used in apologies and fallback text.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceName::Placements => "placement",
            ResourceName::Admissions => "admission",
            ResourceName::About => "university",
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted content for one resource.
///
/// A failed acquisition is an [`crate::Error`], not a `PageContent`; an empty
/// `summary` is legal and means the page held nothing recognizable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Heading/paragraph parts joined with blank lines, capped in length.
    pub summary: String,

    /// Table rows, each a `" | "`-joined sequence of cell texts.
    pub rows: Vec<String>,

    /// When the content was scraped from the origin.
    pub fetched_at: DateTime<Utc>,
}

impl PageContent {
    pub fn new(summary: impl Into<String>, rows: Vec<String>) -> Self {
        Self { summary: summary.into(), rows, fetched_at: Utc::now() }
    }
}
