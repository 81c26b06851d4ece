//! reqwest-backed implementation of `ClientContract`

use crate::core::{RelfetchError, RelfetchResult};
use crate::di::ClientContract;
use crate::download::progress::ProgressFactory;
use crate::download::response::HttpResponse;
use crate::download::settings::{AcceptType, ClientSettings};
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Builds the underlying reqwest client from the current settings.
///
/// Replaceable so tests and embedders can control the transport (timeouts,
/// proxies, custom roots).
pub type ClientFactory =
    Arc<dyn Fn(&ClientSettings) -> RelfetchResult<reqwest::Client> + Send + Sync>;

/// Production HTTP client
pub struct Client {
    settings: ClientSettings,
    create_client: ClientFactory,
    /// Built client, tagged with the `disable_ssl` value it was built for.
    cached: Mutex<Option<(bool, reqwest::Client)>>,
}

impl Client {
    /// Create a client authenticating with `token` (empty for anonymous)
    pub fn new(token: &str) -> Self {
        Self::with_settings(ClientSettings::new(token))
    }

    pub fn with_settings(settings: ClientSettings) -> Self {
        Self {
            settings,
            create_client: Self::default_factory(),
            cached: Mutex::new(None),
        }
    }

    /// The factory used unless one is set explicitly
    pub fn default_factory() -> ClientFactory {
        Arc::new(|settings: &ClientSettings| {
            reqwest::Client::builder()
                .user_agent(concat!("relfetch/", env!("CARGO_PKG_VERSION")))
                .danger_accept_invalid_certs(settings.disable_ssl)
                .build()
                .map_err(RelfetchError::Http)
        })
    }

    /// Replace the transport factory
    pub fn set_client_factory(&mut self, factory: ClientFactory) {
        self.create_client = factory;
        self.reset_cached();
    }

    pub fn with_client_factory(mut self, factory: ClientFactory) -> Self {
        self.set_client_factory(factory);
        self
    }

    pub fn token(&self) -> &str {
        &self.settings.token
    }

    pub fn headers(&self) -> &[String] {
        &self.settings.headers
    }

    pub fn accept(&self) -> Option<&str> {
        self.settings.accept.as_deref()
    }

    /// The reqwest client for the current settings, built on first use
    pub fn http_client(&self) -> RelfetchResult<reqwest::Client> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| RelfetchError::Config("HTTP client cache poisoned".to_string()))?;

        if let Some((disable_ssl, client)) = cached.as_ref() {
            if *disable_ssl == self.settings.disable_ssl {
                return Ok(client.clone());
            }
        }

        let client = (self.create_client)(&self.settings)?;
        *cached = Some((self.settings.disable_ssl, client.clone()));
        Ok(client)
    }

    fn reset_cached(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
    }

    async fn send(&self, url: &str, accept: Option<&str>) -> RelfetchResult<reqwest::Response> {
        let http = self.http_client()?;
        let mut request = http.get(url);
        for (name, value) in self.settings.request_headers(accept)? {
            request = request.header(name, value);
        }

        debug!(url, "GET");
        Ok(request.send().await?)
    }

    async fn fetch(&self, url: &str, accept: Option<&str>) -> RelfetchResult<HttpResponse> {
        let response = self.send(url, accept).await?;
        let response = HttpResponse::read(response).await?;
        debug!(url, status = response.status, bytes = response.body.len(), "response");
        Ok(response)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl ClientContract for Client {
    fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    async fn get(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.fetch(url, None).await
    }

    async fn get_json(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.fetch(url, Some(AcceptType::Json.as_str())).await
    }

    async fn get_binary_file(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.fetch(url, Some(AcceptType::OctetStream.as_str())).await
    }

    async fn get_text(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.fetch(url, Some(AcceptType::Text.as_str())).await
    }

    async fn download(
        &self,
        url: &str,
        out: &mut (dyn Write + Send),
        progress: &ProgressFactory,
    ) -> RelfetchResult<u64> {
        let mut response = self.send(url, None).await?;

        if !response.status().is_success() {
            let response = HttpResponse::read(response).await?;
            return Err(response.into_api_error(url).into());
        }

        let bar = progress(response.content_length().unwrap_or(0));
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            out.write_all(&chunk)?;
            written += chunk.len() as u64;
            bar.inc(chunk.len() as u64);
        }

        out.flush()?;
        bar.finish();
        debug!(url, bytes = written, "download complete");
        Ok(written)
    }
}
