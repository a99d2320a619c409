use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use curify_core::error::CoreError;

use crate::catalog::CatalogError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `curify_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The catalog files could not be read or parsed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Catalog errors ---
            AppError::Catalog(err) => {
                tracing::error!(error = %err, "Catalog load failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CATALOG_ERROR",
                    "The catalog could not be loaded".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
