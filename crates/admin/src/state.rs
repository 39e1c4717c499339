//! Application state shared across handlers.

use std::sync::Arc;

use wellness_way_store::{AdRepository, RecordStore, WebResultRepository};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &dyn RecordStore {
        self.inner.store.as_ref()
    }

    /// Typed access to the `ads` table.
    #[must_use]
    pub fn ads(&self) -> AdRepository<'_> {
        AdRepository::new(self.store())
    }

    /// Typed access to the `web_results` table.
    #[must_use]
    pub fn web_results(&self) -> WebResultRepository<'_> {
        WebResultRepository::new(self.store())
    }
}
