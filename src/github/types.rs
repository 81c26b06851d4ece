//! GitHub API type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub release information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(default)]
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
}

impl Release {
    /// The release's assets as download descriptors, in API order
    pub fn to_assets(&self) -> Vec<Asset> {
        self.assets.iter().map(Asset::from).collect()
    }
}

/// Release asset as the API reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// A downloadable file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    pub name: String,
    pub download_url: String,
}

impl From<&RawAsset> for Asset {
    fn from(raw: &RawAsset) -> Self {
        Self {
            name: raw.name.clone(),
            download_url: raw.download_url.clone(),
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.download_url)
    }
}
