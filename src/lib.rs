//! relfetch: locate and download GitHub release assets
//!
//! This crate resolves a `(repository, tag)` request to a concrete release,
//! falling back to a paged search of the release history when the tag is not
//! an exact match, and streams the chosen asset to disk.

pub use relfetch_core::{format_error_with_help, ErrorHelp, RelfetchError, RelfetchResult};

/// Core module re-exported from relfetch-core.
pub mod core {
    pub use relfetch_core::core::*;
    pub use relfetch_core::{expand_home, format_error_with_help, ErrorHelp, PathExpander};
}

/// Configuration management.
pub mod config;

/// Dependency injection (service traits, mocks, container).
pub mod di;

/// HTTP transport, request settings and progress reporting.
pub mod download;

/// GitHub release resolution.
pub mod github;

/// Download destinations.
pub mod target;
