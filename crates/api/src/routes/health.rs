use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Generation of the catalog snapshot being served.
    pub catalog_generation: u64,
    /// Number of distinct templates in the current snapshot.
    pub templates: usize,
}

/// GET /health -- returns service and catalog health.
///
/// An empty catalog still serves requests, so it reports `degraded` rather
/// than failing.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.catalog.snapshot().await;
    let status = if snapshot.registry.is_empty() { "degraded" } else { "ok" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_generation: snapshot.generation,
        templates: snapshot.registry.template_count(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
