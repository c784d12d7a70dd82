//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::ScheduleRegistry;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for persistence operations
    pub repository: Arc<dyn FullRepository>,
    /// Live per-provider schedule engines
    pub registry: Arc<ScheduleRegistry>,
}

impl AppState {
    /// Create a new application state with the given repository and a fresh
    /// registry.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            registry: Arc::new(ScheduleRegistry::new()),
        }
    }
}
