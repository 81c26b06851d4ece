//! Header and auth state shared by every `ClientContract` implementation

use crate::core::{RelfetchError, RelfetchResult};

/// Token type used when none has been set.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Well-known media types for the `Accept` header.
///
/// `ClientSettings::set_accept` takes any string; these are conveniences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptType {
    GitHubJson,
    Json,
    OctetStream,
    Text,
}

impl AcceptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptType::GitHubJson => "application/vnd.github+json",
            AcceptType::Json => "application/json",
            AcceptType::OctetStream => "application/octet-stream",
            AcceptType::Text => "text/plain",
        }
    }
}

impl std::fmt::Display for AcceptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AcceptType> for String {
    fn from(accept: AcceptType) -> Self {
        accept.as_str().to_string()
    }
}

/// Token, headers and TLS settings for outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub token: String,
    token_type: String,
    /// Extra headers, each stored as `Name:Value`, emitted in order.
    pub headers: Vec<String>,
    pub accept: Option<String>,
    pub disable_ssl: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            headers: Vec::new(),
            accept: None,
            disable_ssl: false,
        }
    }
}

impl ClientSettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Set the token type. The first character is upper-cased
    /// (`token` becomes `Token`); an empty kind restores the default.
    pub fn set_token_type(&mut self, kind: &str) {
        let kind = kind.trim();
        let mut chars = kind.chars();
        self.token_type = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => DEFAULT_TOKEN_TYPE.to_string(),
        };
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(format!("{}:{}", name, value));
    }

    /// Value for the `Authorization` header, if a token is set.
    pub fn authorization(&self) -> Option<String> {
        if self.token.is_empty() {
            None
        } else {
            Some(format!("{} {}", self.token_type, self.token))
        }
    }

    /// Headers to send, in emission order: `Accept`, `Authorization`, then
    /// the extra headers in the order they were added.
    ///
    /// `accept_override` replaces the configured `Accept` value.
    pub fn request_headers(
        &self,
        accept_override: Option<&str>,
    ) -> RelfetchResult<Vec<(String, String)>> {
        let mut out = Vec::with_capacity(self.headers.len() + 2);

        if let Some(accept) = accept_override.or(self.accept.as_deref()) {
            out.push(("Accept".to_string(), accept.to_string()));
        }

        if let Some(auth) = self.authorization() {
            out.push(("Authorization".to_string(), auth));
        }

        for raw in &self.headers {
            let (name, value) = raw
                .split_once(':')
                .ok_or_else(|| RelfetchError::Header(format!("expected Name:Value, got '{}'", raw)))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(RelfetchError::Header(format!("empty header name in '{}'", raw)));
            }
            out.push((name.to_string(), value.trim().to_string()));
        }

        Ok(out)
    }
}
