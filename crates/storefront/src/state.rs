//! Application state shared across handlers.

use std::sync::Arc;

use crate::analytics::{AnalyticsSink, TracingSink};
use crate::carts::CartRegistry;
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::i18n::{Messages, MessagesError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("messages error: {0}")]
    Messages(#[from] MessagesError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, content, message tables, session carts, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    messages: Messages,
    carts: CartRegistry,
    analytics: Arc<dyn AnalyticsSink>,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// Loads the embedded catalog and message tables and the markdown
    /// content directory named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any of those inputs is invalid - all three are
    /// startup defects, not runtime conditions.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = Catalog::load_embedded()?;
        let content = ContentStore::load(&config.content_dir)?;
        let messages = Messages::load()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                messages,
                carts: CartRegistry::new(),
                analytics: Arc::new(TracingSink),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the markdown content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the UI message tables.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.inner.messages
    }

    /// Get a reference to the session cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }

    /// Get a reference to the analytics sink.
    #[must_use]
    pub fn analytics(&self) -> &dyn AnalyticsSink {
        self.inner.analytics.as_ref()
    }
}
