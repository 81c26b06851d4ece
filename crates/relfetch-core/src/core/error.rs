use std::fmt;
use thiserror::Error;

pub type RelfetchResult<T> = Result<T, RelfetchError>;

#[derive(Error, Debug)]
pub enum RelfetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The remote API answered with a non-success status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A release was found but it is not newer than the caller's minimum time.
    /// Callers usually treat this as "nothing to do" rather than a failure.
    #[error("requested release is not more recent than current version")]
    NoUpgrade,

    #[error("no matching tag for '{0}'")]
    NoMatchingTag(String),

    #[error("pre-release finder: {0}")]
    LatestTag(#[source] Box<RelfetchError>),

    #[error("Invalid header: {0}")]
    Header(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Asset error: {0}")]
    Asset(String),
}

impl RelfetchError {
    /// Whether this is the "already up to date" condition.
    pub fn is_no_upgrade(&self) -> bool {
        matches!(self, RelfetchError::NoUpgrade)
    }

    /// The upstream status code, if this error came from the remote API.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RelfetchError::Api(e) => Some(e.code),
            RelfetchError::LatestTag(inner) => inner.status_code(),
            RelfetchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Upstream API error, kept verbatim so callers can report exactly what the
/// server said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Status line, e.g. "404 Not Found".
    pub status: String,
    pub code: u16,
    pub body: Vec<u8>,
    /// The URL that was requested.
    pub url: String,
}

impl ApiError {
    /// The `message` field of a JSON error body, when there is one.
    pub fn message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value.get("message")?.as_str().map(str::to_string)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{} ({}): {}", self.status, self.url, message),
            None if self.body.is_empty() => write!(f, "{} ({})", self.status, self.url),
            None => write!(
                f,
                "{} ({}): {}",
                self.status,
                self.url,
                String::from_utf8_lossy(&self.body).trim()
            ),
        }
    }
}

impl std::error::Error for ApiError {}
