//! Handlers for inspecting and reloading the catalog snapshot.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use curify_core::types::Timestamp;

use crate::catalog::CatalogSnapshot;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Summary of one catalog snapshot.
#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub generation: u64,
    pub loaded_at: Timestamp,
    pub templates: usize,
    pub images: usize,
    pub inspirations: usize,
    pub duplicate_template_ids: Vec<String>,
    pub orphan_image_ids: Vec<String>,
}

impl From<&CatalogSnapshot> for CatalogInfo {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            generation: snapshot.generation,
            loaded_at: snapshot.loaded_at,
            templates: snapshot.registry.template_count(),
            images: snapshot.registry.images().len(),
            inspirations: snapshot.inspirations.len(),
            duplicate_template_ids: snapshot.registry.duplicate_template_ids().to_vec(),
            orphan_image_ids: snapshot
                .registry
                .orphan_image_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// GET /catalog
pub async fn get_catalog_info(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.catalog.snapshot().await;
    Ok(Json(DataResponse {
        data: CatalogInfo::from(snapshot.as_ref()),
    }))
}

/// POST /catalog/reload
///
/// Re-reads the catalog files and swaps in the new snapshot. When loading
/// fails the previous snapshot keeps serving and the error is returned.
pub async fn reload_catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.catalog.reload().await?;
    tracing::info!(generation = snapshot.generation, "Catalog reloaded");
    Ok(Json(DataResponse {
        data: CatalogInfo::from(snapshot.as_ref()),
    }))
}
