//! Static FAQ table loaded once at startup.
//!
//! The table maps lowercase trigger phrases to canned answers and is never
//! mutated at runtime. Lookup is containment-based: the first trigger found
//! inside the (lowercased) message wins. Triggers are held in sorted order so
//! first-match-wins is deterministic across runs.

use std::collections::BTreeMap;
use std::path::Path;

use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct FaqTable {
    entries: Vec<(String, String)>,
}

impl FaqTable {
    /// Load the table from a JSON object file mapping trigger to answer.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::FaqTable(format!("read {}: {e}", path.display())))?;
        let map: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| Error::FaqTable(format!("parse {}: {e}", path.display())))?;
        Ok(Self::from_pairs(map))
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(trigger, answer)| (trigger.to_lowercase(), answer))
            .collect();
        Self { entries }
    }

    /// First trigger phrase contained in `message` wins.
    pub fn lookup(&self, message: &str) -> Option<&str> {
        let message = message.to_lowercase();
        self.entries
            .iter()
            .find(|(trigger, _)| message.contains(trigger.as_str()))
            .map(|(_, answer)| answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
