pub mod catalog;
pub mod feed;
pub mod health;
pub mod languages;
pub mod prompts;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /languages                       supported language table (GET)
///
/// /feed                            interleaved editorial + template feed (GET)
/// /nano/cards                      template feed cards only (GET)
///
/// /templates                       template views (GET)
/// /templates/{slug}                template detail, slug or full id (GET)
///
/// /prompts/fill                    fill a base prompt or a template's prompt (POST)
///
/// /catalog                         current snapshot info (GET)
/// /catalog/reload                  rebuild and swap the catalog snapshot (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/languages", languages::router())
        .merge(feed::router())
        .nest("/templates", templates::router())
        .nest("/prompts", prompts::router())
        .nest("/catalog", catalog::router())
}
