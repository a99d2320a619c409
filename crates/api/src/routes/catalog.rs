use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes -- mounted at `/catalog`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::get_catalog_info))
        .route("/reload", post(catalog::reload_catalog))
}
