//! Mock implementations of service traits for testing

use super::traits::{ClientContract, ConfigProvider};
use crate::core::{RelfetchError, RelfetchResult};
use crate::download::{AcceptType, ClientSettings, HttpResponse, ProgressFactory};
use crate::github::PagingLimits;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Body GitHub returns for unknown endpoints
pub const NOT_FOUND_BODY: &str =
    r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use relfetch::di::mocks::MockConfigProvider;
/// use relfetch::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.token = Some("secret".to_string());
///
/// assert_eq!(config.token(), Some("secret"));
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub api_url: String,
    pub token: Option<String>,
    pub token_type: String,
    pub accept: Option<String>,
    pub extra_headers: Vec<String>,
    pub disable_ssl: bool,
    pub paging: PagingLimits,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            token_type: "Bearer".to_string(),
            accept: None,
            extra_headers: Vec::new(),
            disable_ssl: false,
            paging: PagingLimits::default(),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
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
        self.paging
    }
}

/// A request seen by [`MockHttpClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    /// Headers the client would have sent, in emission order
    pub headers: Vec<(String, String)>,
}

#[derive(Clone)]
enum MockRoute {
    Respond(HttpResponse),
    /// Simulated transport failure
    Fail(String),
}

/// In-memory HTTP client for testing
///
/// Responses are registered per exact URL (query string included). Unknown
/// URLs answer 404 with GitHub's "Not Found" body. Every request is recorded.
///
/// # Example
///
/// ```
/// use relfetch::di::mocks::MockHttpClient;
///
/// let client = MockHttpClient::new();
/// client.add_json(
///     "https://api.github.com/repos/o/r/releases/latest",
///     200,
///     r#"{"tag_name":"v1.0.0","created_at":"2020-01-01T00:00:00Z","assets":[]}"#,
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    settings: ClientSettings,
    routes: Arc<Mutex<HashMap<String, MockRoute>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock client with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `url` with `response`
    pub fn add_response(&self, url: &str, response: HttpResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), MockRoute::Respond(response));
    }

    /// Respond to `url` with a JSON body and status
    pub fn add_json(&self, url: &str, status: u16, body: &str) {
        self.add_response(
            url,
            HttpResponse::new(status, body).with_header("Content-Type", "application/json"),
        );
    }

    /// Fail requests to `url` as if the connection broke
    pub fn add_failure(&self, url: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), MockRoute::Fail(message.to_string()));
    }

    /// All requests made so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs requested so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    fn respond(&self, url: &str, accept: Option<&str>) -> RelfetchResult<HttpResponse> {
        let headers = self.settings.request_headers(accept)?;
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers,
        });

        match self.routes.lock().unwrap().get(url).cloned() {
            Some(MockRoute::Respond(response)) => Ok(response),
            Some(MockRoute::Fail(message)) => Err(RelfetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
            None => Ok(HttpResponse::new(404, NOT_FOUND_BODY)),
        }
    }
}

#[async_trait]
impl ClientContract for MockHttpClient {
    fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    async fn get(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.respond(url, None)
    }

    async fn get_json(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.respond(url, Some(AcceptType::Json.as_str()))
    }

    async fn get_binary_file(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.respond(url, Some(AcceptType::OctetStream.as_str()))
    }

    async fn get_text(&self, url: &str) -> RelfetchResult<HttpResponse> {
        self.respond(url, Some(AcceptType::Text.as_str()))
    }

    async fn download(
        &self,
        url: &str,
        out: &mut (dyn Write + Send),
        progress: &ProgressFactory,
    ) -> RelfetchResult<u64> {
        let response = self.respond(url, None)?;
        if !response.is_success() {
            return Err(response.into_api_error(url).into());
        }

        let bar = progress(response.body.len() as u64);
        out.write_all(&response.body)?;
        out.flush()?;
        bar.inc(response.body.len() as u64);
        bar.finish();
        Ok(response.body.len() as u64)
    }
}
