//! Regional storefront table loaded from a JSON mapping file.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Maps region names to storefront base URLs.
///
/// Loaded once at startup from a JSON object of `"name": "url"` pairs and
/// immutable afterwards. Each region is a geographic variant of the same
/// storefront with its own domain.
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: BTreeMap<String, String>,
}

impl RegionTable {
    /// Loads the region table from a JSON file.
    ///
    /// A missing or malformed file is a fatal configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading region table from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read regions file: {}", path.display()))?;

        let regions: BTreeMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse regions file: {}", path.display()))?;

        debug!("Loaded {} regions", regions.len());
        Ok(Self { regions })
    }

    /// Builds a table from name/URL pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self { regions: pairs.into_iter().collect() }
    }

    /// Resolves a region name to its base URL. Lookup is exact-match.
    pub fn url(&self, name: &str) -> Result<&str, RegionError> {
        self.regions.get(name).map(String::as_str).ok_or_else(|| RegionError::Unknown {
            name: name.to_string(),
            known: self.names().join(", "),
        })
    }

    /// Returns all region names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    /// Iterates name/URL pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if no regions were loaded.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Clone, Error)]
pub enum RegionError {
    #[error("Unknown region '{name}'. Known regions: {known}")]
    Unknown { name: String, known: String },
}
