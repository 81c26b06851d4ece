//! Trait definitions for dependency injection

use crate::core::RelfetchResult;
use crate::download::{ClientSettings, HttpResponse, ProgressFactory};
use crate::github::PagingLimits;
use async_trait::async_trait;
use std::io::Write;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Base URL of the GitHub API (no trailing slash)
    fn api_url(&self) -> &str;

    /// API token, if one is configured
    fn token(&self) -> Option<&str>;

    /// Token type for the Authorization header (e.g. "Bearer", "token")
    fn token_type(&self) -> &str;

    /// Accept media type sent with plain GET requests
    fn accept(&self) -> Option<&str>;

    /// Extra headers, each as `Name:Value`
    fn extra_headers(&self) -> &[String];

    /// Whether TLS certificate verification is disabled
    fn disable_ssl(&self) -> bool;

    /// Page size and page ceiling for the fallback release search
    fn paging_limits(&self) -> PagingLimits;
}

/// Trait for the HTTP operations the release finder and downloader need
///
/// Header, token and TLS setters are provided on top of
/// [`ClientSettings`]; implementations only supply access to their settings
/// and the request methods. None of the request methods turn a non-2xx status
/// into an error, except [`download`](ClientContract::download), which has
/// nowhere else to report it.
#[async_trait]
pub trait ClientContract: Send + Sync {
    /// Current header/auth settings
    fn settings(&self) -> &ClientSettings;

    /// Mutable header/auth settings
    fn settings_mut(&mut self) -> &mut ClientSettings;

    fn set_token(&mut self, token: &str) {
        self.settings_mut().token = token.to_string();
    }

    fn token_type(&self) -> &str {
        self.settings().token_type()
    }

    fn set_token_type(&mut self, kind: &str) {
        self.settings_mut().set_token_type(kind);
    }

    /// Replace all extra headers (each `Name:Value`)
    fn set_headers(&mut self, headers: Vec<String>) {
        self.settings_mut().headers = headers;
    }

    /// Append one extra header
    fn add_header(&mut self, name: &str, value: &str) {
        self.settings_mut().add_header(name, value);
    }

    fn set_accept(&mut self, accept: &str) {
        self.settings_mut().accept = Some(accept.to_string());
    }

    /// Toggle certificate verification; only meant for test servers
    fn set_disable_ssl(&mut self, disable: bool) {
        self.settings_mut().disable_ssl = disable;
    }

    /// GET with the configured headers and auth
    async fn get(&self, url: &str) -> RelfetchResult<HttpResponse>;

    /// GET with `Accept: application/json`
    async fn get_json(&self, url: &str) -> RelfetchResult<HttpResponse>;

    /// GET with `Accept: application/octet-stream`
    async fn get_binary_file(&self, url: &str) -> RelfetchResult<HttpResponse>;

    /// GET with `Accept: text/plain`
    async fn get_text(&self, url: &str) -> RelfetchResult<HttpResponse>;

    /// Stream the body of `url` into `out`
    ///
    /// `progress` is called once with the expected length (0 if unknown) and
    /// the returned bar is advanced as chunks arrive.
    async fn download(
        &self,
        url: &str,
        out: &mut (dyn Write + Send),
        progress: &ProgressFactory,
    ) -> RelfetchResult<u64>;
}
