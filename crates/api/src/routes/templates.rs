//! Template routes -- mounted at `/templates`.
//!
//! ```text
//! GET /          list_templates
//! GET /{slug}    get_template_detail
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list_templates))
        .route("/{slug}", get(templates::get_template_detail))
}
