//! Editorial inspiration cards: the primary stream of the feed.
//!
//! Cards come from the content backend already shaped for display. This
//! module only knows how to narrow them down by language and search text.

use serde::{Deserialize, Serialize};

use crate::locale::{normalize_locale, Locale};

/// Language assumed for cards that carry no `lang` tag.
pub const DEFAULT_CARD_LANG: &str = "zh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspirationCard {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub hook: Hook,
    #[serde(default)]
    pub signal: Signal,
    #[serde(default)]
    pub translation: Translation,
    #[serde(default)]
    pub production: Production,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub angles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, rename = "durationSec", skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,
    #[serde(default)]
    pub beats: Vec<String>,
}

/// AI quality rating, 0-5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub reason: String,
}

impl InspirationCard {
    /// Lowercased language tag, defaulting to `zh`.
    pub fn lang_tag(&self) -> String {
        self.lang
            .as_deref()
            .unwrap_or(DEFAULT_CARD_LANG)
            .to_ascii_lowercase()
    }

    /// Whether the card belongs in a feed for `locale`.
    ///
    /// An `en` (or `en-*`) feed keeps `en*` cards; any other feed keeps `zh*` cards.
    pub fn matches_locale(&self, locale: &Locale) -> bool {
        let prefix = normalize_locale(locale.as_str());
        self.lang_tag().starts_with(prefix.as_str())
    }

    /// Lowercased text the search box matches against.
    pub fn searchable_text(&self) -> String {
        let parts = [
            self.signal.summary.as_deref(),
            self.translation.tag.as_deref(),
        ]
        .into_iter()
        .flatten()
        .chain(self.translation.angles.iter().map(String::as_str))
        .chain(self.hook.text.as_deref())
        .chain(self.production.format.as_deref())
        .chain(self.production.beats.iter().map(String::as_str))
        .filter(|s| !s.is_empty());

        parts.collect::<Vec<_>>().join(" ").to_lowercase()
    }
}

/// Keep cards matching `locale`, then those containing `query` (if any).
pub fn filter_inspiration(
    cards: &[InspirationCard],
    locale: &Locale,
    query: &str,
) -> Vec<InspirationCard> {
    let needle = query.trim().to_lowercase();

    cards
        .iter()
        .filter(|card| card.matches_locale(locale))
        .filter(|card| needle.is_empty() || card.searchable_text().contains(&needle))
        .cloned()
        .collect()
}
