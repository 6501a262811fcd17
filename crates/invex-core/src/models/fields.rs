//! Extraction result mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder value for a field that could not be located.
pub const NOT_FOUND: &str = "Not Found";

/// Ordered mapping from field name to extracted value.
///
/// Field order follows registry order. A `None` value is the "not found"
/// sentinel; values are never empty strings (an empty value collapses to the
/// sentinel at insertion).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    entries: Vec<(String, Option<String>)>,
}

impl DocumentFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Empty or whitespace-only values collapse to the
    /// sentinel.
    pub fn insert(&mut self, field: impl Into<String>, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        self.entries.push((field.into(), value));
    }

    /// Replace the value of an already-registered field. Returns `false` if
    /// the field is not present in the mapping.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) if !value.trim().is_empty() => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Extracted value for a field, `None` when absent or at the sentinel.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the field name is registered in this mapping at all.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    /// Value for display purposes, with the sentinel spelled out.
    pub fn display_value(&self, field: &str) -> &str {
        self.get(field).unwrap_or(NOT_FOUND)
    }

    /// Iterate fields in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Names of all registered fields, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields that resolved to a value.
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, value)| value.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a flat map so callers see `{"Invoice No": "...", ...}` with
// the sentinel written out, matching the report layer's expectations.
impl Serialize for DocumentFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value.as_deref().unwrap_or(NOT_FOUND))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_value_collapses_to_sentinel() {
        let mut fields = DocumentFields::new();
        fields.insert("Tax", Some("   ".to_string()));

        assert_eq!(fields.get("Tax"), None);
        assert_eq!(fields.display_value("Tax"), NOT_FOUND);
    }

    #[test]
    fn test_set_only_touches_registered_fields() {
        let mut fields = DocumentFields::new();
        fields.insert("Total", None);

        assert!(fields.set("Total", "1,240.50".to_string()));
        assert!(!fields.set("Discount", "5.00".to_string()));
        assert_eq!(fields.get("Total"), Some("1,240.50"));
    }

    #[test]
    fn test_serializes_as_map_with_sentinel() {
        let mut fields = DocumentFields::new();
        fields.insert("Invoice No", Some("INV-001".to_string()));
        fields.insert("Due Date", None);

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Invoice No": "INV-001", "Due Date": "Not Found"})
        );
    }

    #[test]
    fn test_order_preserved() {
        let mut fields = DocumentFields::new();
        fields.insert("B", None);
        fields.insert("A", None);

        let names: Vec<&str> = fields.names().collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
