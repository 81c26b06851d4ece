//! User-facing hints attached to errors.

use crate::core::error::RelfetchError;

/// Suggests what the user can do about an error.
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for RelfetchError {
    fn help(&self) -> Option<String> {
        match self {
            RelfetchError::Api(e) => match e.code {
                401 => Some("Check that your GitHub token is valid and not expired.".to_string()),
                403 | 429 => Some(
                    "You may be rate limited. Set GITHUB_TOKEN to raise the GitHub API limit."
                        .to_string(),
                ),
                404 => Some(
                    "Check the repository name (owner/name) and the requested tag.".to_string(),
                ),
                _ => None,
            },
            RelfetchError::NoMatchingTag(_) => Some(
                "No release tag contains this text. Try a shorter tag, or --pre-release if it is a prerelease."
                    .to_string(),
            ),
            RelfetchError::LatestTag(inner) => inner.help(),
            RelfetchError::Http(e) if e.is_connect() || e.is_timeout() => {
                Some("Check your network connection.".to_string())
            }
            RelfetchError::Yaml(_) | RelfetchError::Config(_) => {
                Some("Check the relfetch config.yaml file.".to_string())
            }
            _ => None,
        }
    }
}

/// Render an error for the terminal, followed by a hint when one applies.
pub fn format_error_with_help(error: &RelfetchError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}
