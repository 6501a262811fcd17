//! Common regex patterns for field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Colon glued to the following token, repaired by the normalizer
    pub static ref GLUED_COLON: Regex = Regex::new(
        r":(\S)"
    ).unwrap();

    // Generic number-like token salvaged from a qualifying line
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"\d+(?:[./-]\d+)*"
    ).unwrap();

    // Whole-text fallback for totals: "Total" / "Grand Total" plus an amount
    pub static ref TOTAL_FALLBACK: Regex = Regex::new(
        r"(?i)\b(?:grand\s+)?total\b[\s:\-]*(\d[\d,]*(?:\.\d+)?)"
    ).unwrap();

    // Whole-text fallback for dates: 1-2 digit day/month, 2-4 digit year
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_token_stops_at_comma() {
        let m = NUMBER_TOKEN.find("ref 12/2024, ok").unwrap();
        assert_eq!(m.as_str(), "12/2024");
    }

    #[test]
    fn test_total_fallback_keeps_thousands_separator() {
        let caps = TOTAL_FALLBACK.captures("Grand Total: 1,240.50").unwrap();
        assert_eq!(&caps[1], "1,240.50");
    }

    #[test]
    fn test_total_fallback_ignores_subtotal() {
        assert!(TOTAL_FALLBACK.captures("Subtotal: 100.00").is_none());
    }

    #[test]
    fn test_total_fallback_spans_lines() {
        let caps = TOTAL_FALLBACK.captures("Grand Total\n1,240.50").unwrap();
        assert_eq!(&caps[1], "1,240.50");
    }

    #[test]
    fn test_date_token_shapes() {
        assert_eq!(DATE_TOKEN.find("due 15/01/2024").unwrap().as_str(), "15/01/2024");
        assert_eq!(DATE_TOKEN.find("due 5-1-24").unwrap().as_str(), "5-1-24");
        assert!(DATE_TOKEN.find("order 123/456789").is_none());
    }
}
