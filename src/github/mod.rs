//! GitHub release resolution
//!
//! This module turns a repository and tag specifier into the list of
//! downloadable assets of one release:
//! - Direct lookup of `latest`, `tags/<name>` or a release id
//! - Resolution of the latest tag when prereleases are wanted
//! - Paginated substring search through the release history when an exact
//!   tag lookup misses
//! - Picking one asset of the resolved release by name filters

pub mod finder;
pub mod select;
pub mod types;

pub use finder::{find_assets, tag_specifier, AssetFinder, PagingLimits, ResolutionRequest};
pub use select::{filter_assets, select_asset};
pub use types::{Asset, RawAsset, Release};
