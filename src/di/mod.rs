//! Dependency injection infrastructure for relfetch
//!
//! The release finder depends on [`ClientContract`] rather than on a concrete
//! HTTP client, so tests can run it against [`mocks::MockHttpClient`].
//!
//! # Example (Production)
//! ```no_run
//! use relfetch::di::ServiceContainer;
//!
//! # fn example() -> relfetch::core::RelfetchResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use relfetch::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let client = Arc::new(MockHttpClient::new());
//!
//! let container = ServiceContainer::with_providers(config, client);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

pub use container::ServiceContainer;
pub use traits::{ClientContract, ConfigProvider};
