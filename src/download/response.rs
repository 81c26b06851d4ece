use crate::core::{ApiError, RelfetchResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A fully-read HTTP response.
///
/// The status is kept as-is; deciding what a non-2xx status means is left
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Status line such as "404 Not Found".
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_line: status_line(status),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Exactly `200 OK`, the only status that carries an API document.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> RelfetchResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Wrap this response as an upstream API error for `url`.
    pub fn into_api_error(self, url: &str) -> ApiError {
        ApiError {
            status: self.status_line,
            code: self.status,
            body: self.body,
            url: url.to_string(),
        }
    }

    pub(crate) async fn read(response: reqwest::Response) -> RelfetchResult<Self> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Self {
            status: status.as_u16(),
            status_line: status.to_string(),
            headers,
            body,
        })
    }
}

fn status_line(code: u16) -> String {
    StatusCode::from_u16(code)
        .map(|s| s.to_string())
        .unwrap_or_else(|_| code.to_string())
}
