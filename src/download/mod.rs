//! HTTP client used for both GitHub API calls and asset downloads
//!
//! The resolution engine talks to the network only through
//! [`ClientContract`](crate::di::ClientContract). [`Client`] is the
//! production implementation; `di::mocks::MockHttpClient` is the in-memory one.

pub mod client;
pub mod progress;
pub mod response;
pub mod settings;

pub use client::{Client, ClientFactory};
pub use progress::{byte_progress_bar, hidden_progress, ProgressFactory};
pub use response::HttpResponse;
pub use settings::{AcceptType, ClientSettings, DEFAULT_TOKEN_TYPE};
