//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use harvest_core::queue::TaskQueue;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers and the background worker.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Task / record persistence.
    pub store: Arc<SqliteStore>,
    /// Work queue feeding the background worker.
    pub queue: TaskQueue<SqliteStore>,
}
