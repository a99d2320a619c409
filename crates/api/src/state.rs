use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (defaults for locale and image limits).
    pub config: Arc<ServerConfig>,
    /// Current catalog snapshot and its reload logic.
    pub catalog: Arc<CatalogStore>,
}
