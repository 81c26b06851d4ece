//! Service container for dependency injection

use super::traits::{ClientContract, ConfigProvider};
use crate::config::Config;
use crate::core::RelfetchResult;
use crate::download::Client;
use crate::github::AssetFinder;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the configuration and the HTTP client as trait objects, so the
/// production client can be swapped for `MockHttpClient` in tests.
///
/// # Example (Testing)
///
/// ```
/// use relfetch::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let config = Arc::new(MockConfigProvider::default());
/// let client = Arc::new(MockHttpClient::new());
///
/// let container = ServiceContainer::with_providers(config, client);
/// assert_eq!(container.finder().api_url(), "https://api.github.com");
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub client: Arc<dyn ClientContract>,
}

impl ServiceContainer {
    /// Create a service container with production implementations
    ///
    /// Loads the config (file plus environment) and builds a [`Client`]
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn new() -> RelfetchResult<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(config))
    }

    /// Create a service container from an already-loaded config
    pub fn from_config(config: Config) -> Self {
        let client = client_from_config(&config);
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }

    /// Create a service container with custom provider implementations
    ///
    /// This is primarily useful for testing, where you can inject mock
    /// implementations of each service.
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        client: Arc<dyn ClientContract>,
    ) -> Self {
        Self { config, client }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the HTTP client
    pub fn client(&self) -> &dyn ClientContract {
        self.client.as_ref()
    }

    /// An asset finder pointed at the configured API with configured paging
    pub fn finder(&self) -> AssetFinder {
        AssetFinder::new(self.config.api_url()).with_paging(self.config.paging_limits())
    }
}

/// Build a production client from configuration
pub fn client_from_config(config: &dyn ConfigProvider) -> Client {
    let mut client = Client::default();
    if let Some(token) = config.token() {
        client.set_token(token);
    }
    client.set_token_type(config.token_type());
    client.set_headers(config.extra_headers().to_vec());
    if let Some(accept) = config.accept() {
        client.set_accept(accept);
    }
    client.set_disable_ssl(config.disable_ssl());
    client
}
