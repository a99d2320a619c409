//! Handler for prompt filling.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use curify_core::catalog::deserialize_optional_params;
use curify_core::error::CoreError;
use curify_core::locale::Locale;
use curify_core::projection::{slug_to_template_id, template_view};
use curify_core::prompt::{extract_placeholders, fill_prompt};
use curify_core::types::Params;

use crate::error::AppResult;
use crate::query::requested_locale;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /prompts/fill`.
///
/// Either pass a `base_prompt` directly, or a `template_id` (slug or full id)
/// whose base prompt is resolved in `locale`.
#[derive(Debug, Deserialize)]
pub struct FillPromptRequest {
    pub base_prompt: Option<String>,
    pub template_id: Option<String>,
    pub locale: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_params")]
    pub params: Option<Params>,
}

#[derive(Debug, Serialize)]
pub struct FillPromptResponse {
    pub prompt: String,
    /// Placeholders left in `prompt` because no value was supplied.
    pub unfilled: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Locale the template body was resolved to, when filling a template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

/// POST /prompts/fill
pub async fn fill(
    State(state): State<AppState>,
    Json(input): Json<FillPromptRequest>,
) -> AppResult<impl IntoResponse> {
    let (base_prompt, template_id, locale) = match (input.base_prompt, input.template_id) {
        (Some(_), Some(_)) => {
            return Err(CoreError::Validation(
                "Provide either base_prompt or template_id, not both".to_string(),
            )
            .into());
        }
        (base, None) => (base, None, None),
        (None, Some(slug)) => {
            let template_id = slug_to_template_id(&slug);
            let locale = requested_locale(input.locale.as_deref(), &state.config.default_locale);
            let snapshot = state.catalog.snapshot().await;
            let view = template_view(&snapshot.registry, &template_id, &locale).ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Template",
                    id: template_id.clone(),
                }
            })?;
            (Some(view.base_prompt), Some(template_id), Some(view.locale))
        }
    };

    let prompt = fill_prompt(base_prompt.as_deref(), input.params.as_ref());
    let unfilled = extract_placeholders(&prompt);
    tracing::debug!(
        template_id = template_id.as_deref().unwrap_or("-"),
        unfilled = unfilled.len(),
        "Filled prompt"
    );

    Ok(Json(DataResponse {
        data: FillPromptResponse {
            prompt,
            unfilled,
            template_id,
            locale,
        },
    }))
}
