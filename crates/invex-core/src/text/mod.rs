//! Normalization of recovered text into matchable lines.

use crate::extract::patterns::GLUED_COLON;

/// Recovered document text, normalized into an ordered sequence of
/// non-empty trimmed lines. Line order is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    lines: Vec<String>,
}

impl DocumentText {
    /// Normalize raw provider output.
    ///
    /// Trims each line, drops empty lines, and inserts a space after a colon
    /// glued to the next token so keyword-adjacent values stay separable.
    /// Rewrites are uniform and never reorder lines. Always succeeds,
    /// possibly with an empty sequence.
    pub fn normalize(raw: &str) -> Self {
        let lines = raw
            .lines()
            .map(|line| GLUED_COLON.replace_all(line, ": $1").into_owned())
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whole-text view used by the corrective pass.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trims_and_drops_empty_lines() {
        let doc = DocumentText::normalize("  Invoice No: 1  \n\n\n  Total: 5  \n");
        assert_eq!(doc.lines(), &["Invoice No: 1", "Total: 5"]);
    }

    #[test]
    fn test_pads_glued_colon() {
        let doc = DocumentText::normalize("Invoice No:INV-001");
        assert_eq!(doc.lines(), &["Invoice No: INV-001"]);
    }

    #[test]
    fn test_spaced_colon_untouched() {
        let doc = DocumentText::normalize("Invoice No: INV-001");
        assert_eq!(doc.lines(), &["Invoice No: INV-001"]);
    }

    #[test]
    fn test_empty_input() {
        let doc = DocumentText::normalize("");
        assert!(doc.is_empty());
        assert_eq!(doc.joined(), "");
    }

    #[test]
    fn test_order_preserved() {
        let doc = DocumentText::normalize("b\n\na\nc");
        assert_eq!(doc.lines(), &["b", "a", "c"]);
        assert_eq!(doc.joined(), "b\na\nc");
    }
}
