use crate::core::error::{RelfetchError, RelfetchResult};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Get the relfetch config directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\relfetch
/// - Linux: ~/.config/relfetch
/// - macOS: ~/Library/Application Support/relfetch
pub fn relfetch_home() -> RelfetchResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| RelfetchError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("relfetch"))
}

/// Get the config file path (`<relfetch_home>/config.yaml`)
pub fn config_file() -> RelfetchResult<PathBuf> {
    Ok(relfetch_home()?.join("config.yaml"))
}

/// Expands a leading `~` in paths to a home directory.
///
/// The home directory can be pinned with [`PathExpander::with_home`];
/// otherwise the current user's home is looked up.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn set_home(&mut self, home: impl Into<PathBuf>) -> &mut Self {
        self.home = Some(home.into());
        self
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// The configured home directory, or the current user's.
    pub fn home_directory(&self) -> RelfetchResult<PathBuf> {
        if let Some(home) = self.home.as_ref().filter(|h| !h.as_os_str().is_empty()) {
            return Ok(home.clone());
        }

        dirs::home_dir()
            .ok_or_else(|| RelfetchError::Path("Could not determine home directory".to_string()))
    }

    /// Replace a leading `~/` with the home directory.
    ///
    /// Paths that do not start with `~/` are returned unchanged.
    pub fn expand(&self, path: &str) -> RelfetchResult<PathBuf> {
        let prefix = format!("~{}", MAIN_SEPARATOR);
        match path.strip_prefix(&prefix) {
            Some(rest) => {
                let home = self
                    .home_directory()
                    .map_err(|e| RelfetchError::Path(format!("expand tilde: {}", e)))?;
                Ok(home.join(rest))
            }
            None => Ok(PathBuf::from(path)),
        }
    }
}

/// Expand a leading `~/` using the current user's home directory.
pub fn expand_home(path: &str) -> RelfetchResult<PathBuf> {
    PathExpander::new().expand(path)
}
