//! Locale-resolved views over the registry: feed cards, template views and
//! template detail pages.
//!
//! Projections are recomputed on every query and never cached or mutated.

use serde::Serialize;

use crate::catalog::{CuratedCard, Parameter};
use crate::locale::{resolve, Locale};
use crate::prompt::{param_summary, DEFAULT_SUMMARY_PAIRS};
use crate::registry::Registry;
use crate::types::Params;

/// Default number of images carried by a feed card.
pub const DEFAULT_MAX_IMAGES_PER_TEMPLATE: usize = 6;

/// Prefix carried by every canonical template id.
pub const TEMPLATE_ID_PREFIX: &str = "template-";

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One card per template, as consumed by feed and list UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedCard {
    /// Card id; the template id, since there is one card per template.
    pub id: String,
    pub template_id: String,
    /// The locale the template body was resolved to.
    pub locale: Locale,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_prompt: Option<String>,
    pub parameters: Vec<Parameter>,
    pub image_urls: Vec<String>,
    /// Same length and order as `image_urls`.
    pub preview_image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_parameters: Option<Params>,
}

/// A template resolved to a single locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateView {
    pub template_id: String,
    pub slug: String,
    pub locale: Locale,
    pub category: String,
    pub description: String,
    pub base_prompt: String,
    pub parameters: Vec<Parameter>,
    pub cards: Vec<CuratedCard>,
}

/// An image record with its localized metadata resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub id: String,
    pub template_id: String,
    /// The locale that was requested for this image.
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub params: Params,
    pub image_url: String,
    pub preview_image_url: String,
}

/// Everything the template detail page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDetail {
    pub template: TemplateView,
    pub cards: Vec<DetailCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub image_id: String,
    pub params: Params,
    /// Caption built from the first non-blank params, e.g. `style: flat · subject: cat`.
    pub summary: String,
    pub image_url: String,
    pub preview_image_url: String,
}

/// Options for [`project_all_templates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    pub max_images_per_template: usize,
    /// Drop templates whose body only exists in a fallback locale.
    pub strict_locale: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            max_images_per_template: DEFAULT_MAX_IMAGES_PER_TEMPLATE,
            strict_locale: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// URL slug for a template id: the id without its `template-` prefix.
pub fn to_slug(template_id: &str) -> &str {
    template_id
        .strip_prefix(TEMPLATE_ID_PREFIX)
        .unwrap_or(template_id)
}

/// Inverse of [`to_slug`]; a full template id is passed through.
pub fn slug_to_template_id(slug: &str) -> String {
    if slug.starts_with(TEMPLATE_ID_PREFIX) {
        slug.to_string()
    } else {
        format!("{TEMPLATE_ID_PREFIX}{slug}")
    }
}

/// Site path of a template's detail page.
pub fn template_path(template_id: &str, locale: &Locale) -> String {
    format!("/{locale}/nano-template/{}", to_slug(template_id))
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Resolve a template to `locale` (with fallback).
pub fn template_view(
    registry: &Registry,
    template_id: &str,
    locale: &Locale,
) -> Option<TemplateView> {
    let template = registry.template(template_id)?;
    let resolved = resolve(Some(&template.locales), locale)?;
    let body = resolved.value;

    Some(TemplateView {
        template_id: template.id.clone(),
        slug: to_slug(&template.id).to_string(),
        locale: resolved.locale,
        category: body.category.clone(),
        description: body.description.clone(),
        base_prompt: body.base_prompt.clone(),
        parameters: body.parameters.clone(),
        cards: template.cards.clone(),
    })
}

/// All images of a template, each resolved to `locale` independently.
///
/// An image lacking metadata in every fallback locale still appears, just
/// without a title or category.
pub fn image_views(registry: &Registry, template_id: &str, locale: &Locale) -> Vec<ImageView> {
    registry
        .images_for_template(template_id)
        .map(|img| {
            let meta = resolve(Some(&img.locales), locale).map(|r| r.value);
            ImageView {
                id: img.id.clone(),
                template_id: img.template_id.clone(),
                locale: locale.clone(),
                title: meta.and_then(|m| m.title.clone()),
                category: meta.and_then(|m| m.category.clone()),
                params: img.params.clone(),
                image_url: img.asset.image_url.clone(),
                preview_image_url: img.asset.preview_or_main().to_string(),
            }
        })
        .collect()
}

/// Project one template into a feed card.
///
/// Returns `None` when the template is unknown, has no resolvable body, or
/// has no images. Images are kept in registry order, truncated to the first
/// `max_images`; `sample_parameters` come from the first kept image.
pub fn project_template(
    registry: &Registry,
    template_id: &str,
    locale: &Locale,
    max_images: usize,
) -> Option<FeedCard> {
    let view = template_view(registry, template_id, locale)?;

    let mut images = image_views(registry, template_id, &view.locale);
    images.truncate(max_images);
    if images.is_empty() {
        return None;
    }

    let sample_parameters = images.first().map(|img| img.params.clone());
    let (image_urls, preview_image_urls): (Vec<_>, Vec<_>) = images
        .into_iter()
        .map(|img| (img.image_url, img.preview_image_url))
        .unzip();

    Some(FeedCard {
        id: view.template_id.clone(),
        template_id: view.template_id,
        locale: view.locale,
        category: view.category,
        description: Some(view.description),
        base_prompt: Some(view.base_prompt),
        parameters: view.parameters,
        image_urls,
        preview_image_urls,
        sample_parameters,
    })
}

/// Project every template in registry order, skipping those with no card.
///
/// With `strict_locale`, templates that only resolved through fallback are
/// dropped instead of showing another locale's content.
pub fn project_all_templates(
    registry: &Registry,
    locale: &Locale,
    opts: FeedOptions,
) -> Vec<FeedCard> {
    registry
        .templates()
        .iter()
        .filter_map(|t| project_template(registry, &t.id, locale, opts.max_images_per_template))
        .filter(|card| !opts.strict_locale || &card.locale == locale)
        .collect()
}

/// Build the detail page data for a template.
///
/// Uses the template's curated cards when it has any, otherwise one card per
/// image. Curated entries pointing at unknown images are dropped; a curated
/// card with no params shows the image's own params.
pub fn template_detail(
    registry: &Registry,
    template_id: &str,
    locale: &Locale,
) -> Option<TemplateDetail> {
    let template = template_view(registry, template_id, locale)?;
    let images = image_views(registry, template_id, &template.locale);

    let curated: Vec<CuratedCard> = if template.cards.is_empty() {
        images
            .iter()
            .map(|img| CuratedCard {
                image_id: img.id.clone(),
                params: img.params.clone(),
            })
            .collect()
    } else {
        template.cards.clone()
    };

    let cards = curated
        .into_iter()
        .filter_map(|card| {
            let img = images.iter().find(|img| img.id == card.image_id)?;
            let params = if card.params.is_empty() {
                img.params.clone()
            } else {
                card.params
            };
            Some(DetailCard {
                image_id: img.id.clone(),
                summary: param_summary(Some(&params), DEFAULT_SUMMARY_PAIRS),
                params,
                image_url: img.image_url.clone(),
                preview_image_url: img.preview_image_url.clone(),
            })
        })
        .collect();

    Some(TemplateDetail { template, cards })
}
