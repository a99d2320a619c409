//! Locale tags and localized-payload resolution.
//!
//! Catalog entities carry a map of locale-specific payloads. Resolution picks
//! the exact locale when present, then falls back to `zh`, then `en`. The
//! fallback chain is fixed and does not depend on the requested locale.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// A lowercase language tag identifying a content variant (`zh`, `en`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub const ZH_TAG: &'static str = "zh";
    pub const EN_TAG: &'static str = "en";

    /// Build a locale from any tag. The tag is trimmed and lowercased.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase())
    }

    pub fn zh() -> Self {
        Self(Self::ZH_TAG.to_string())
    }

    pub fn en() -> Self {
        Self(Self::EN_TAG.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zh(&self) -> bool {
        self.0 == Self::ZH_TAG
    }

    pub fn is_en(&self) -> bool {
        self.0 == Self::EN_TAG
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Collapse an arbitrary tag onto one of the two site locales.
///
/// `en` and any `en-*`/`en_*` variant map to `en`; everything else maps to `zh`.
pub fn normalize_locale(tag: &str) -> Locale {
    let lower = tag.trim().to_ascii_lowercase();
    let lang = lower.split(['-', '_']).next().unwrap_or("");
    if lang == Locale::EN_TAG {
        Locale::en()
    } else {
        Locale::zh()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A localized payload together with the locale it was actually found under.
#[derive(Debug, PartialEq, Eq)]
pub struct Resolved<'a, T> {
    pub value: &'a T,
    pub locale: Locale,
}

/// Pick the best localized payload for `requested`.
///
/// Order: exact match, then `zh`, then `en`. Returns `None` when the map is
/// absent or holds none of those.
pub fn resolve<'a, T>(
    localized: Option<&'a HashMap<Locale, T>>,
    requested: &Locale,
) -> Option<Resolved<'a, T>> {
    let localized = localized?;

    if let Some(value) = localized.get(requested) {
        return Some(Resolved {
            value,
            locale: requested.clone(),
        });
    }

    [Locale::zh(), Locale::en()]
        .into_iter()
        .find_map(|fallback| {
            localized.get(&fallback).map(|value| Resolved {
                value,
                locale: fallback,
            })
        })
}

// ---------------------------------------------------------------------------
// Language table
// ---------------------------------------------------------------------------

/// A language offered by the site's language switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub locale: &'static str,
    pub name: &'static str,
    /// Primary languages are shown directly in the header; the rest sit
    /// behind a "more" menu.
    pub primary: bool,
}

/// All languages the site offers, primary ones first.
pub const SUPPORTED_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { locale: "en", name: "English", primary: true },
    LanguageInfo { locale: "zh", name: "中文", primary: true },
    LanguageInfo { locale: "es", name: "Español", primary: false },
    LanguageInfo { locale: "fr", name: "Français", primary: false },
    LanguageInfo { locale: "de", name: "Deutsch", primary: false },
    LanguageInfo { locale: "ja", name: "日本語", primary: false },
    LanguageInfo { locale: "hi", name: "हिंदी", primary: false },
    LanguageInfo { locale: "tr", name: "Türkçe", primary: false },
];

/// Look up a language by its tag.
pub fn language_by_tag(tag: &str) -> Option<&'static LanguageInfo> {
    let tag = tag.trim().to_ascii_lowercase();
    SUPPORTED_LANGUAGES.iter().find(|l| l.locale == tag)
}
