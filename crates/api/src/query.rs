//! Shared query parameter types for API handlers.

use serde::Deserialize;

use curify_core::locale::{language_by_tag, Locale};

/// `?locale=` parameter accepted by every read endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

/// Pick the requested locale, or the configured default when absent or blank.
///
/// Tags outside the site's language table are passed through; the resolver
/// falls back to `zh`/`en` for them.
pub fn requested_locale(param: Option<&str>, default: &Locale) -> Locale {
    match param.map(str::trim) {
        Some(tag) if !tag.is_empty() => {
            if language_by_tag(tag).is_none() {
                tracing::debug!(locale = tag, "Unsupported locale requested");
            }
            Locale::new(tag)
        }
        _ => default.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_locale_uses_default() {
        assert_eq!(requested_locale(None, &Locale::zh()), Locale::zh());
        assert_eq!(requested_locale(Some("  "), &Locale::zh()), Locale::zh());
        assert_eq!(requested_locale(Some("EN"), &Locale::zh()), Locale::en());
    }
}
