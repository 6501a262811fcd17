//! Per-line field matching.
//!
//! Strategies run in strict priority order; the first one producing a
//! non-empty value wins. This is not a best-of-all-strategies selection.

use super::patterns::NUMBER_TOKEN;
use super::registry::FieldDef;

/// Matching policy shared by all fields of one engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Similarity score (0-100) a line must strictly exceed to qualify
    /// without verbatim keyword containment.
    pub similarity_threshold: f64,

    /// Maximum extracted value length, in characters.
    pub max_value_len: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: 80.0,
            max_value_len: 50,
        }
    }
}

/// Try to produce a value for `field` from a single normalized line.
///
/// 1. Exact containment: each keyword in priority order, case-insensitive;
///    on a hit, the keyword-adjacent capture expression isolates the value.
///    An empty capture counts as a failed capture and falls through.
/// 2. Approximate similarity: the best partial-containment score against the
///    whole keyword list must strictly exceed the threshold; a number-like
///    token is salvaged if present, else the line itself is the value.
///
/// Returns `None` when the line carries no signal for this field.
pub fn match_line(line: &str, field: &FieldDef, policy: &MatchPolicy) -> Option<String> {
    let folded = line.to_lowercase();

    for keyword in field.keywords() {
        if !folded.contains(keyword.folded()) {
            continue;
        }
        if let Some(caps) = keyword.capture().captures(line) {
            let value = caps[1].trim();
            if !value.is_empty() {
                return Some(clip(value, policy.max_value_len));
            }
        }
    }

    if best_similarity(&folded, field) > policy.similarity_threshold {
        if let Some(token) = NUMBER_TOKEN.find(line) {
            return Some(clip(token.as_str(), policy.max_value_len));
        }
        let value = line.trim();
        if !value.is_empty() {
            return Some(clip(value, policy.max_value_len));
        }
    }

    None
}

/// Best partial-containment similarity (0-100) of a case-folded line
/// against a field's keyword list. Only a strictly greater score replaces
/// the running best, so keyword priority order breaks ties.
pub fn best_similarity(folded_line: &str, field: &FieldDef) -> f64 {
    field.keywords().iter().fold(0.0, |best, keyword| {
        let score =
            rapidfuzz::fuzz::partial_ratio(folded_line.chars(), keyword.folded().chars()) * 100.0;
        if score > best { score } else { best }
    })
}

/// Truncation is the last step: applied to the finished value, counted in
/// characters.
pub(crate) fn clip(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::registry::{FieldRegistry, FieldSpec};
    use pretty_assertions::assert_eq;

    fn field<'a>(registry: &'a FieldRegistry, name: &str) -> &'a FieldDef {
        registry.fields().iter().find(|f| f.name() == name).unwrap()
    }

    #[test]
    fn test_keyword_adjacent_capture() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        let value = match_line("Invoice No: INV-2024-001", field(&registry, "Invoice No"), &policy);
        assert_eq!(value.as_deref(), Some("INV-2024-001"));
    }

    #[test]
    fn test_capture_is_case_insensitive() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        let value = match_line("INVOICE NO - 7781", field(&registry, "Invoice No"), &policy);
        assert_eq!(value.as_deref(), Some("7781"));
    }

    #[test]
    fn test_containment_without_capture_falls_to_similarity() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        // "USD" is contained but trails the line, so value capture fails;
        // the similarity strategy then returns the line itself.
        let value = match_line("Currency: USD", field(&registry, "Currency"), &policy);
        assert_eq!(value.as_deref(), Some("Currency: USD"));
    }

    #[test]
    fn test_similarity_salvages_number_token() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        // OCR corrupted the keyword, so containment fails; the line still
        // scores above the threshold and the amount is salvaged.
        let value = match_line("Tot@l Amount 450.00", field(&registry, "Total"), &policy);
        assert_eq!(value.as_deref(), Some("450.00"));
    }

    #[test]
    fn test_similarity_returns_line_without_number() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        let value = match_line("Tot@l Amount due on receipt", field(&registry, "Total"), &policy);
        assert_eq!(value.as_deref(), Some("Tot@l Amount due on receipt"));
    }

    #[test]
    fn test_unrelated_line_has_no_signal() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy::default();

        let value = match_line("Thank you for your business", field(&registry, "Total"), &policy);
        assert_eq!(value, None);
    }

    #[test]
    fn test_threshold_is_strict() {
        let specs = vec![FieldSpec::new("Code", &["alpha"])];
        let registry = FieldRegistry::from_specs(&specs).unwrap();
        let def = field(&registry, "Code");

        // Containment hits but capture fails, so the line reaches the
        // similarity strategy with a score of exactly 100, which must not
        // qualify against a threshold of 100.
        let strict = MatchPolicy { similarity_threshold: 100.0, max_value_len: 50 };
        assert_eq!(match_line("alpha", def, &strict), None);

        let loose = MatchPolicy { similarity_threshold: 50.0, max_value_len: 50 };
        assert_eq!(match_line("alpha", def, &loose).as_deref(), Some("alpha"));
    }

    #[test]
    fn test_truncation_is_exact_and_last() {
        let registry = FieldRegistry::standard();
        let policy = MatchPolicy { similarity_threshold: 80.0, max_value_len: 10 };

        let value = match_line(
            "Vendor: Consolidated Intergalactic Holdings",
            field(&registry, "Vendor"),
            &policy,
        )
        .unwrap();
        assert_eq!(value.chars().count(), 10);
        assert_eq!(value, "Consolidat");
    }

    #[test]
    fn test_empty_capture_collapses() {
        let specs = vec![FieldSpec::new("Note", &["Note"])];
        let registry = FieldRegistry::from_specs(&specs).unwrap();
        let policy = MatchPolicy::default();

        // Containment hits, capture has nothing to grab, similarity then
        // returns the line itself.
        let value = match_line("Note", field(&registry, "Note"), &policy);
        assert_eq!(value.as_deref(), Some("Note"));
    }
}
