//! Handlers for the home/hub feed.
//!
//! The feed merges the editorial cards of the current catalog snapshot
//! (filtered by language and search text) with one template card per nano
//! template, interleaved at a fixed cadence.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use curify_core::inspiration::filter_inspiration;
use curify_core::interleave::{interleave, InterleaveOptions, TailPolicy};
use curify_core::locale::Locale;
use curify_core::projection::{project_all_templates, FeedOptions};

use crate::error::{AppError, AppResult};
use crate::query::requested_locale;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for the template card endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NanoCardParams {
    pub locale: Option<String>,
    pub max_images: Option<usize>,
    #[serde(default)]
    pub strict: bool,
}

/// Query parameters for `GET /feed`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub locale: Option<String>,
    /// Free-text search over editorial cards.
    pub q: Option<String>,
    pub max_images: Option<usize>,
    #[serde(default)]
    pub strict: bool,
    /// `append` (default) or `never`.
    pub tail: Option<String>,
    pub group_every: Option<usize>,
    pub group_size: Option<usize>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn feed_options(state: &AppState, max_images: Option<usize>, strict: bool) -> FeedOptions {
    FeedOptions {
        max_images_per_template: max_images.unwrap_or(state.config.feed_max_images),
        strict_locale: strict,
    }
}

fn interleave_options(params: &FeedParams) -> AppResult<InterleaveOptions> {
    let defaults = InterleaveOptions::default();
    let tail = match params.tail.as_deref() {
        None => defaults.tail,
        Some(raw) => TailPolicy::parse(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid tail policy '{raw}'. Must be one of: append, never"
            ))
        })?,
    };

    Ok(InterleaveOptions {
        group_every: params.group_every.unwrap_or(defaults.group_every),
        group_size: params.group_size.unwrap_or(defaults.group_size),
        tail,
    })
}

// ---------------------------------------------------------------------------
// GET /feed
// ---------------------------------------------------------------------------

/// Interleaved feed of editorial cards and template cards.
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    let locale: Locale = requested_locale(params.locale.as_deref(), &state.config.default_locale);
    let opts = interleave_options(&params)?;
    let snapshot = state.catalog.snapshot().await;

    let primary = filter_inspiration(
        &snapshot.inspirations,
        &locale,
        params.q.as_deref().unwrap_or(""),
    );
    let secondary = project_all_templates(
        &snapshot.registry,
        &locale,
        feed_options(&state, params.max_images, params.strict),
    );

    let primary_count = primary.len();
    let secondary_count = secondary.len();
    let entries = interleave(primary, &secondary, opts);

    tracing::debug!(
        %locale,
        generation = snapshot.generation,
        primary_count,
        secondary_count,
        entries = entries.len(),
        "Composed feed"
    );
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// GET /nano/cards
// ---------------------------------------------------------------------------

/// One feed card per template, in catalog order.
pub async fn list_nano_cards(
    State(state): State<AppState>,
    Query(params): Query<NanoCardParams>,
) -> AppResult<impl IntoResponse> {
    let locale = requested_locale(params.locale.as_deref(), &state.config.default_locale);
    let snapshot = state.catalog.snapshot().await;

    let cards = project_all_templates(
        &snapshot.registry,
        &locale,
        feed_options(&state, params.max_images, params.strict),
    );
    tracing::debug!(%locale, count = cards.len(), "Listed nano cards");
    Ok(Json(DataResponse { data: cards }))
}
