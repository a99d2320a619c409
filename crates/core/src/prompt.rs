//! Prompt filling and placeholder helpers.
//!
//! A template's base prompt contains `{name}` tokens. Filling replaces each
//! token with the matching parameter value; tokens with no value are left in
//! place so the UI can show which fields are still open.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{LocalizedTemplateBody, Parameter};
use crate::types::Params;

/// Regex pattern matching identifier-shaped `{placeholder}` tokens.
pub const PLACEHOLDER_PATTERN: &str = r"\{([A-Za-z_][A-Za-z0-9_.\-]*)\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Separator used between pairs in [`param_summary`].
pub const SUMMARY_SEPARATOR: &str = " · ";

/// Default number of pairs shown by [`param_summary`].
pub const DEFAULT_SUMMARY_PAIRS: usize = 2;

// ---------------------------------------------------------------------------
// Filling
// ---------------------------------------------------------------------------

/// Substitute `{key}` tokens in `base_prompt` with values from `params`.
///
/// - Missing or empty base prompt yields `""`.
/// - Missing params returns the base prompt unchanged.
/// - Every literal occurrence of `{key}` is replaced, case-sensitively, in
///   the params' insertion order. Keys are matched literally.
/// - Placeholders without a value stay as `{name}`.
pub fn fill_prompt(base_prompt: Option<&str>, params: Option<&Params>) -> String {
    let Some(base) = base_prompt.filter(|b| !b.is_empty()) else {
        return String::new();
    };
    let Some(params) = params else {
        return base.to_string();
    };

    params.iter().fold(base.to_string(), |prompt, (key, value)| {
        prompt.replace(&format!("{{{key}}}"), value)
    })
}

// ---------------------------------------------------------------------------
// Placeholder inspection
// ---------------------------------------------------------------------------

/// Extract all `{placeholder}` names from a template string.
///
/// Returns a de-duplicated, sorted list of names without braces.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Placeholder names referenced in the base prompt with no matching parameter.
///
/// Catalog data is expected to have none; the loader reports these as
/// warnings rather than rejecting the template.
pub fn missing_parameters(body: &LocalizedTemplateBody) -> Vec<String> {
    extract_placeholders(&body.base_prompt)
        .into_iter()
        .filter(|name| !body.parameters.iter().any(|p| &p.name == name))
        .collect()
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Short `key: value` summary of the first non-blank parameters.
pub fn param_summary(params: Option<&Params>, max_pairs: usize) -> String {
    let Some(params) = params else {
        return String::new();
    };

    params
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .take(max_pairs)
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Initial form values for a template's parameters.
///
/// A non-blank override (e.g. from the page's query string) wins; otherwise
/// the first prefill candidate of a list-style placeholder is used. Parameters
/// with neither are left out, so the filled prompt keeps their `{name}` token.
pub fn prefill_form(parameters: &[Parameter], overrides: &Params) -> Params {
    let mut form = Params::new();
    for param in parameters {
        if let Some(value) = overrides
            .get(&param.name)
            .filter(|v| !v.trim().is_empty())
        {
            form.insert(param.name.clone(), value.clone());
            continue;
        }
        if let Some(first) = param.prefill_candidates().first() {
            form.insert(param.name.clone(), (*first).to_string());
        }
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ParameterKind, Placeholder};

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parameter(name: &str, placeholder: Option<Placeholder>) -> Parameter {
        Parameter {
            name: name.to_string(),
            label: name.to_uppercase(),
            kind: ParameterKind::Text,
            placeholder,
            options: Vec::new(),
        }
    }

    // --- fill_prompt ---

    #[test]
    fn fill_replaces_every_occurrence() {
        let p = params(&[("name", "Ann")]);
        assert_eq!(
            fill_prompt(Some("Hi {name}, bye {name}"), Some(&p)),
            "Hi Ann, bye Ann"
        );
    }

    #[test]
    fn fill_missing_base_is_empty() {
        assert_eq!(fill_prompt(None, Some(&Params::new())), "");
        assert_eq!(fill_prompt(Some(""), Some(&params(&[("a", "b")]))), "");
    }

    #[test]
    fn fill_without_params_returns_base() {
        assert_eq!(fill_prompt(Some("Hello {name}"), None), "Hello {name}");
    }

    #[test]
    fn fill_leaves_unmatched_placeholders() {
        let p = params(&[("a", "1")]);
        assert_eq!(fill_prompt(Some("{a} and {b}"), Some(&p)), "1 and {b}");
    }

    #[test]
    fn fill_is_case_sensitive() {
        let p = params(&[("Name", "Ann")]);
        assert_eq!(fill_prompt(Some("{name}"), Some(&p)), "{name}");
    }

    #[test]
    fn fill_treats_keys_literally() {
        let p = params(&[("a.b", "X"), ("c+", "Y")]);
        assert_eq!(fill_prompt(Some("{a.b} {axb} {c+}"), Some(&p)), "X {axb} Y");
    }

    #[test]
    fn fill_is_idempotent_once_fully_filled() {
        let p = params(&[("subject", "cat"), ("style", "ink")]);
        let base = Some("A {subject} drawn in {style}, {subject} again");
        let once = fill_prompt(base, Some(&p));
        let twice = fill_prompt(Some(once.as_str()), Some(&p));
        assert_eq!(once, twice);
    }

    // --- placeholders ---

    #[test]
    fn extract_placeholders_dedups_and_sorts() {
        assert_eq!(
            extract_placeholders("{b} {a} {b} {not valid} {}"),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn missing_parameters_reports_unknown_names() {
        let body = LocalizedTemplateBody {
            category: "c".into(),
            description: String::new(),
            base_prompt: "{subject} in {style}".into(),
            parameters: vec![parameter("subject", None)],
        };
        assert_eq!(missing_parameters(&body), vec!["style".to_string()]);
    }

    // --- summary / prefill ---

    #[test]
    fn param_summary_skips_blank_values() {
        let p = params(&[("a", " "), ("b", "2"), ("c", "3"), ("d", "4")]);
        assert_eq!(param_summary(Some(&p), DEFAULT_SUMMARY_PAIRS), "b: 2 · c: 3");
        assert_eq!(param_summary(None, 2), "");
        assert_eq!(param_summary(Some(&params(&[("a", "")])), 2), "");
    }

    #[test]
    fn prefill_prefers_overrides_then_candidates() {
        let parameters = vec![
            parameter("subject", Some(Placeholder::Candidates(vec!["cat".into()]))),
            parameter("style", Some(Placeholder::Candidates(vec![" ".into(), "ink".into()]))),
            parameter("mood", Some(Placeholder::Text("calm".into()))),
        ];
        let overrides = params(&[("subject", "dog"), ("style", "  ")]);

        let form = prefill_form(&parameters, &overrides);

        assert_eq!(form.get("subject").map(String::as_str), Some("dog"));
        assert_eq!(form.get("style").map(String::as_str), Some("ink"));
        assert!(form.get("mood").is_none());
    }
}
