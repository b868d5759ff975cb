//! Release store metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where to download a single release asset from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLocator {
    pub name: String,
    pub url: String,
}

/// A tagged release: asset name -> download locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReleaseMetadata {
    pub tag: String,
    pub assets: IndexMap<String, AssetLocator>,
}

impl ReleaseMetadata {
    pub fn asset(&self, name: &str) -> Option<&AssetLocator> {
        self.assets.get(name)
    }
}
