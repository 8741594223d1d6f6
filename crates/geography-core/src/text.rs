// crates/geography-core/src/text.rs

/// Folds a string for accent- and case-insensitive comparison.
///
/// ```
/// use geography_core::fold_key;
///
/// assert_eq!(fold_key("Zürich"), "zurich");
/// assert_eq!(fold_key("São Paulo"), "sao paulo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// `true` if `needle` (already folded) occurs in the folded `haystack`.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(needle)
}

/// Trims a free-text CSV field; blank becomes `None`.
pub fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_strips_diacritics() {
        assert_eq!(fold_key("Łódź"), "lodz");
        assert!(contains_folded("Aéroport de Genève", "geneve"));
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" Schiphol "), Some("Schiphol".to_owned()));
    }
}
