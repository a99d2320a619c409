//! Feed routes, merged at the `/api/v1` root.
//!
//! ```text
//! GET /feed          get_feed
//! GET /nano/cards    list_nano_cards
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feed", get(feed::get_feed))
        .route("/nano/cards", get(feed::list_nano_cards))
}
