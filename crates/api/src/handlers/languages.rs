use axum::response::IntoResponse;
use axum::Json;

use curify_core::locale::SUPPORTED_LANGUAGES;

use crate::error::AppResult;
use crate::response::DataResponse;

/// GET /languages -- the site's language switcher table.
pub async fn list_languages() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: SUPPORTED_LANGUAGES,
    }))
}
