//! Language catalog for the selectors and CLI help.

use isolang::Language;

/// Languages pinned to the top of the selector, in display order.
pub const FEATURED: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "ar",
];

/// English display name for an ISO 639-1 code. Accepts 639-3 as a fallback.
pub fn language_name(code: &str) -> Option<&'static str> {
    Language::from_639_1(code)
        .or_else(|| Language::from_639_3(code))
        .map(|lang| lang.to_name())
}

/// Whether a code is a usable ISO 639-1 selector value (or the auto sentinel).
pub fn is_known_code(code: &str) -> bool {
    code == crate::shared::types::AUTO_SOURCE || Language::from_639_1(code).is_some()
}

/// Human-readable label for a pair, e.g. "Spanish -> English".
pub fn pair_label(source: &str, target: &str) -> String {
    let source_label = if source == crate::shared::types::AUTO_SOURCE {
        "Auto".to_string()
    } else {
        language_name(source).unwrap_or(source).to_string()
    };
    let target_label = language_name(target).unwrap_or(target);
    format!("{} -> {}", source_label, target_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_codes_resolve_to_names() {
        for code in FEATURED {
            assert!(language_name(code).is_some(), "no name for {}", code);
        }
    }

    #[test]
    fn auto_is_a_known_selector_value() {
        assert!(is_known_code("auto"));
        assert!(is_known_code("es"));
        assert!(!is_known_code("xx"));
    }

    #[test]
    fn pair_label_handles_auto() {
        assert_eq!(pair_label("auto", "en"), "Auto -> English");
        assert_eq!(pair_label("es", "en"), "Spanish -> English");
    }
}
