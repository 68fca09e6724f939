use std::sync::Arc;

use mirrorball_core::{Config, LibraryCache, RefreshCoordinator, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    cache: Arc<LibraryCache>,
    refresher: Arc<RefreshCoordinator>,
}

impl AppState {
    pub fn new(
        config: Config,
        cache: Arc<LibraryCache>,
        refresher: Arc<RefreshCoordinator>,
    ) -> Self {
        Self {
            config,
            cache,
            refresher,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn cache(&self) -> &LibraryCache {
        &self.cache
    }

    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }
}
