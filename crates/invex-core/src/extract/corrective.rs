//! Whole-text salvage for fields the per-line pipeline left unresolved.

use tracing::debug;

use super::matcher::{clip, MatchPolicy};
use super::patterns::{DATE_TOKEN, TOTAL_FALLBACK};
use crate::models::fields::DocumentFields;

type SalvageFn = fn(&str) -> Option<String>;

// One rule per recoverable field. Extending the set means adding a row
// here; the per-line pipeline is untouched.
const SALVAGE_RULES: &[(&str, SalvageFn)] = &[
    ("Total", salvage_total),
    ("Invoice Date", salvage_date),
];

/// Run every salvage rule against the whole normalized text.
///
/// Rules apply only to registered fields still at the sentinel; a value the
/// generic pass found is never overridden.
pub fn recover_missing(fields: &mut DocumentFields, text: &str, policy: &MatchPolicy) {
    for (field, rule) in SALVAGE_RULES {
        if !fields.contains(field) || fields.get(field).is_some() {
            continue;
        }
        if let Some(value) = rule(text) {
            debug!("Corrective pass recovered {}: {}", field, value);
            fields.set(field, clip(value.trim(), policy.max_value_len));
        }
    }
}

fn salvage_total(text: &str) -> Option<String> {
    TOTAL_FALLBACK
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn salvage_date(text: &str) -> Option<String> {
    DATE_TOKEN.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sentinel_fields() -> DocumentFields {
        let mut fields = DocumentFields::new();
        fields.insert("Invoice Date", None);
        fields.insert("Total", None);
        fields
    }

    #[test]
    fn test_recovers_grand_total() {
        let mut fields = sentinel_fields();
        let text = "Handling fee waived\nGrand Total: 1,240.50\nThank you";

        recover_missing(&mut fields, text, &MatchPolicy::default());
        assert_eq!(fields.get("Total"), Some("1,240.50"));
    }

    #[test]
    fn test_recovers_date_token() {
        let mut fields = sentinel_fields();
        let text = "Issued 15/01/2024 by accounts";

        recover_missing(&mut fields, text, &MatchPolicy::default());
        assert_eq!(fields.get("Invoice Date"), Some("15/01/2024"));
    }

    #[test]
    fn test_never_overrides_found_value() {
        let mut fields = sentinel_fields();
        fields.set("Total", "900.00".to_string());
        let text = "Grand Total: 1,240.50";

        recover_missing(&mut fields, text, &MatchPolicy::default());
        assert_eq!(fields.get("Total"), Some("900.00"));
    }

    #[test]
    fn test_ignores_unregistered_fields() {
        let mut fields = DocumentFields::new();
        fields.insert("Vendor", None);

        recover_missing(&mut fields, "Grand Total: 1,240.50", &MatchPolicy::default());
        assert_eq!(fields.get("Total"), None);
        assert!(!fields.contains("Total"));
    }

    #[test]
    fn test_sentinel_remains_without_match() {
        let mut fields = sentinel_fields();

        recover_missing(&mut fields, "no amounts here", &MatchPolicy::default());
        assert_eq!(fields.get("Total"), None);
        assert_eq!(fields.get("Invoice Date"), None);
    }
}
