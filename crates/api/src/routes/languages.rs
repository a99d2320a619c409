use axum::routing::get;
use axum::Router;

use crate::handlers::languages;
use crate::state::AppState;

/// Language routes -- mounted at `/languages`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(languages::list_languages))
}
