//! Handlers for template listing and the template detail page.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use curify_core::error::CoreError;
use curify_core::projection::{
    slug_to_template_id, template_detail, template_path, template_view, TemplateDetail,
    TemplateView,
};
use curify_core::prompt::{extract_placeholders, fill_prompt, prefill_form};
use curify_core::types::Params;

use crate::error::AppResult;
use crate::query::{requested_locale, LocaleParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query key that selects the locale; every other key on the detail
/// endpoint is treated as a form override.
const LOCALE_KEY: &str = "locale";

/// Template detail plus the prefilled "reproduce" form.
#[derive(Debug, Serialize)]
pub struct TemplateDetailResponse {
    #[serde(flatten)]
    pub detail: TemplateDetail,
    /// Site path of the detail page.
    pub path: String,
    /// Initial form values (query overrides, then prefill candidates).
    pub form: Params,
    /// Base prompt filled with `form`.
    pub filled_prompt: String,
    /// Placeholders still present in `filled_prompt`.
    pub unfilled: Vec<String>,
}

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List every template resolved to the requested locale, in catalog order.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = requested_locale(params.locale.as_deref(), &state.config.default_locale);
    let snapshot = state.catalog.snapshot().await;

    let views: Vec<TemplateView> = snapshot
        .registry
        .templates()
        .iter()
        .filter_map(|t| template_view(&snapshot.registry, &t.id, &locale))
        .collect();
    tracing::debug!(%locale, count = views.len(), "Listed templates");
    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /templates/{slug}
// ---------------------------------------------------------------------------

/// Template detail by slug (`education-card`) or full id (`template-education-card`).
pub async fn get_template_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let locale_param = query
        .iter()
        .find(|(k, _)| k == LOCALE_KEY)
        .map(|(_, v)| v.as_str());
    let locale = requested_locale(locale_param, &state.config.default_locale);
    let overrides: Params = query
        .iter()
        .filter(|(k, _)| k != LOCALE_KEY)
        .cloned()
        .collect();

    let template_id = slug_to_template_id(&slug);
    let snapshot = state.catalog.snapshot().await;

    let detail = template_detail(&snapshot.registry, &template_id, &locale).ok_or_else(|| {
        CoreError::NotFound {
            entity: "Template",
            id: template_id.clone(),
        }
    })?;

    let form = prefill_form(&detail.template.parameters, &overrides);
    let filled_prompt = fill_prompt(Some(detail.template.base_prompt.as_str()), Some(&form));
    let unfilled = extract_placeholders(&filled_prompt);

    Ok(Json(DataResponse {
        data: TemplateDetailResponse {
            path: template_path(&detail.template.template_id, &detail.template.locale),
            detail,
            form,
            filled_prompt,
            unfilled,
        },
    }))
}
