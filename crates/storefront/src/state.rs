//! Application state shared across handlers.

use std::sync::Arc;

use wellness_way_store::{AdRepository, RecordStore, WebResultRepository};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheap to clone; holds the configuration and the record store adapter.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn RecordStore>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &dyn RecordStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn ads(&self) -> AdRepository<'_> {
        AdRepository::new(self.store())
    }

    #[must_use]
    pub fn web_results(&self) -> WebResultRepository<'_> {
        WebResultRepository::new(self.store())
    }
}
