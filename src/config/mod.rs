use crate::core::path::config_file;
use crate::core::RelfetchResult;
use crate::di::ConfigProvider;
use crate::download::DEFAULT_TOKEN_TYPE;
use crate::github::finder::DEFAULT_API_URL;
use crate::github::PagingLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Environment variables consulted for an API token, in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["RELFETCH_GITHUB_TOKEN", "GITHUB_TOKEN"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API token. Overridden by RELFETCH_GITHUB_TOKEN or GITHUB_TOKEN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Authorization scheme, e.g. "Bearer" or "token"
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Accept media type for plain requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    /// Extra request headers, each as `Name:Value`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_headers: Vec<String>,

    /// Skip TLS certificate verification (test servers only)
    #[serde(default)]
    pub disable_ssl: bool,

    /// Releases per page the API returns
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum pages scanned when searching release history
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

fn default_page_size() -> usize {
    PagingLimits::DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> u32 {
    PagingLimits::DEFAULT_MAX_PAGES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            token_type: default_token_type(),
            accept: None,
            extra_headers: Vec::new(),
            disable_ssl: false,
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, then apply
    /// environment overrides. A missing file yields the defaults.
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\relfetch\config.yaml
    /// - Linux: ~/.config/relfetch/config.yaml
    /// - macOS: ~/Library/Application Support/relfetch/config.yaml
    pub fn load() -> RelfetchResult<Self> {
        let config_path = config_file()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Load config from a specific file, without environment overrides
    pub fn load_from(path: &Path) -> RelfetchResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> RelfetchResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Take the token from the environment when one is set
    pub fn apply_env(&mut self) {
        if let Some(token) = token_from_env() {
            self.token = Some(token);
        }
    }

    pub fn paging_limits(&self) -> PagingLimits {
        PagingLimits::new(self.page_size, self.max_pages)
    }
}

/// First non-empty token from [`TOKEN_ENV_VARS`]
pub fn token_from_env() -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    fn token_type(&self) -> &str {
        &self.token_type
    }

    fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    fn extra_headers(&self) -> &[String] {
        &self.extra_headers
    }

    fn disable_ssl(&self) -> bool {
        self.disable_ssl
    }

    fn paging_limits(&self) -> PagingLimits {
        Config::paging_limits(self)
    }
}
