//! Fixed bindings of the scraped site sections.
//!
//! Each resource binds a site path to the wait selectors a rendering fetch
//! uses and the extraction rules tuned for that page's layout.

use campus_core::{Error, ResourceName};
use url::Url;

use crate::extract::{ExtractRules, PairingMode};

#[derive(Debug, Clone)]
pub struct ResourceSpec {
    pub name: ResourceName,

    /// Path joined onto the configured site base URL.
    pub path: &'static str,

    /// Ordered CSS selectors a rendering fetch waits on; first hit wins.
    pub wait_selectors: &'static [&'static str],

    pub rules: ExtractRules,
}

impl ResourceSpec {
    pub fn url(&self, base: &Url) -> Result<Url, Error> {
        base.join(self.path)
            .map_err(|e| Error::InvalidUrl(format!("{}/{}: {e}", base, self.path)))
    }
}

/// The fixed binding for one resource.
pub fn spec_for(name: ResourceName) -> ResourceSpec {
    match name {
        ResourceName::Placements => ResourceSpec {
            name,
            path: "placements",
            wait_selectors: &["h2", "h3", "table", "p"],
            rules: ExtractRules { paragraph_budget: 12, ..Default::default() },
        },
        ResourceName::Admissions => ResourceSpec {
            name,
            path: "admission-24-25.php",
            wait_selectors: &["h2", "h3", "p", "table"],
            rules: ExtractRules {
                pairing: PairingMode::Siblings,
                paragraph_budget: 14,
                snippet_cap: 400,
                max_tables: 2,
                max_rows: 8,
                ..Default::default()
            },
        },
        ResourceName::About => ResourceSpec {
            name,
            path: "about",
            wait_selectors: &["p", "h2", "h3"],
            rules: ExtractRules { paragraph_budget: 12, ..Default::default() },
        },
    }
}
