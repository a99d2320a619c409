//! Catalog data model: templates, their parameters, and rendered image records.
//!
//! These types mirror the JSON catalog files produced by the offline data
//! pipeline. They are read-only once loaded; a catalog refresh replaces them
//! wholesale.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::locale::Locale;
use crate::types::Params;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// A named generation recipe with one body per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub locales: HashMap<Locale, LocalizedTemplateBody>,
    /// Hand-picked (image, parameter-set) pairs shown on the detail page.
    #[serde(default)]
    pub cards: Vec<CuratedCard>,
}

/// The locale-specific part of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedTemplateBody {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_prompt: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A curated preset on a template: an image plus the parameters to show with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedCard {
    pub image_id: String,
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: Params,
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// One fillable `{name}` slot in a template's base prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ParameterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Parameter {
    /// Non-blank prefill candidates from a list-style placeholder.
    pub fn prefill_candidates(&self) -> Vec<&str> {
        match &self.placeholder {
            Some(Placeholder::Candidates(items)) => items
                .iter()
                .map(String::as_str)
                .filter(|s| !s.trim().is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Input widget a parameter is edited with. Unknown kinds read as `Text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Multi-line free text.
    Textarea,
    /// Pick one of [`Parameter::options`].
    Select,
    #[default]
    #[serde(other)]
    Text,
}

/// Either a plain hint string or a list of prefill candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placeholder {
    Text(String),
    Candidates(Vec<String>),
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// One concrete rendered output of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub template_id: String,
    pub asset: ImageAsset,
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: Params,
    #[serde(default)]
    pub locales: HashMap<Locale, ImageLocaleMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

impl ImageAsset {
    /// Preview URL, falling back to the full image when no preview exists.
    pub fn preview_or_main(&self) -> &str {
        self.preview_image_url.as_deref().unwrap_or(&self.image_url)
    }
}

/// Localized display metadata for an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLocaleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Parameter value coercion
// ---------------------------------------------------------------------------

/// Render a JSON scalar the way it should appear inside a prompt.
///
/// Strings are taken verbatim, `null` becomes empty, everything else uses its
/// JSON text (`3`, `true`, ...).
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Deserialize a parameter map whose values may be any JSON scalar.
///
/// Key order from the source document is preserved. A `null` map is empty.
pub fn deserialize_params<'de, D>(deserializer: D) -> Result<Params, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_params(deserializer).map(Option::unwrap_or_default)
}

/// Like [`deserialize_params`], but keeps "no params given" apart from an
/// empty map. Use with `#[serde(default)]`.
pub fn deserialize_optional_params<'de, D>(deserializer: D) -> Result<Option<Params>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(k, v)| (k, stringify_value(&v)))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn template_deserializes_from_catalog_json() {
        let t: Template = serde_json::from_value(json!({
            "id": "template-a",
            "locales": {
                "en": {
                    "category": "X",
                    "description": "d",
                    "base_prompt": "Hello {name}",
                    "parameters": [
                        { "name": "name", "label": "Name", "type": "text" },
                        { "name": "mood", "label": "Mood", "type": "select", "options": ["calm", "wild"] }
                    ]
                }
            }
        }))
        .unwrap();

        assert_eq!(t.id, "template-a");
        assert!(t.cards.is_empty());
        let body = &t.locales[&Locale::en()];
        assert_eq!(body.parameters.len(), 2);
        assert_eq!(body.parameters[1].kind, ParameterKind::Select);
        assert_eq!(body.parameters[1].options, vec!["calm", "wild"]);
    }

    #[test]
    fn parameter_kind_defaults_to_text() {
        let p: Parameter = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert_eq!(p.kind, ParameterKind::Text);
        assert_eq!(p.label, "");
    }

    #[test]
    fn placeholder_accepts_string_or_list() {
        let single: Parameter =
            serde_json::from_value(json!({ "name": "a", "placeholder": "e.g. a cat" })).unwrap();
        assert_matches!(single.placeholder, Some(Placeholder::Text(_)));
        assert!(single.prefill_candidates().is_empty());

        let list: Parameter = serde_json::from_value(
            json!({ "name": "a", "placeholder": ["", "  ", "cat", "dog"] }),
        )
        .unwrap();
        assert_eq!(list.prefill_candidates(), vec!["cat", "dog"]);
    }

    #[test]
    fn image_params_are_stringified_in_source_order() {
        let img: ImageRecord = serde_json::from_value(json!({
            "id": "img-1",
            "template_id": "template-a",
            "asset": { "image_url": "/a.png" },
            "params": { "zeta": "z", "count": 3, "flag": true, "none": null }
        }))
        .unwrap();

        let keys: Vec<_> = img.params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "count", "flag", "none"]);
        assert_eq!(img.params["count"], "3");
        assert_eq!(img.params["flag"], "true");
        assert_eq!(img.params["none"], "");
        assert!(img.locales.is_empty());
    }

    #[test]
    fn loose_template_body_still_deserializes() {
        let body: LocalizedTemplateBody = serde_json::from_value(json!({
            "base_prompt": "{n} items",
            "parameters": [{ "name": "n", "type": "number" }]
        }))
        .unwrap();

        assert_eq!(body.category, "");
        assert_eq!(body.parameters[0].kind, ParameterKind::Text);
        assert_eq!(serde_json::to_value(body.parameters[0].kind).unwrap(), "text");
    }

    #[test]
    fn null_params_deserialize_as_empty() {
        let card: CuratedCard =
            serde_json::from_value(json!({ "image_id": "img-1", "params": null })).unwrap();
        assert!(card.params.is_empty());
    }

    #[test]
    fn preview_falls_back_to_main_image() {
        let asset = ImageAsset {
            image_url: "/a.png".into(),
            preview_image_url: None,
        };
        assert_eq!(asset.preview_or_main(), "/a.png");

        let asset = ImageAsset {
            image_url: "/a.png".into(),
            preview_image_url: Some("/a-prev.png".into()),
        };
        assert_eq!(asset.preview_or_main(), "/a-prev.png");
    }
}
