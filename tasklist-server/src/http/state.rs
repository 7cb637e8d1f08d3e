//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Environment;
use crate::db::Store;
use crate::http::error::ApiError;

/// Shared application state
///
/// `store` is `None` when no database is configured; every DB-backed
/// handler then answers 503.
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn Store>>,
    env: Environment,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn Store>>, env: Environment) -> Self {
        Self { store, env }
    }

    /// The configured store, or `ServiceUnavailable`.
    pub fn store(&self) -> Result<&dyn Store, ApiError> {
        self.store.as_deref().ok_or(ApiError::ServiceUnavailable)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}
