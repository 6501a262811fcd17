//! Field registry: names and keyword phrases, compiled for matching.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvexError;

/// Serde-visible shape of one registry entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, e.g. "Invoice Date".
    pub name: String,
    /// Keyword phrases in priority order.
    pub keywords: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// One keyword phrase, compiled for matching.
#[derive(Debug, Clone)]
pub struct Keyword {
    phrase: String,
    folded: String,
    capture: Regex,
}

impl Keyword {
    fn compile(phrase: &str) -> Result<Self, InvexError> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(InvexError::Config("empty keyword phrase".to_string()));
        }

        // Keyword followed by separators, then a run of value characters.
        let pattern = format!(r"(?i){}[\s:\-]+([\w\s.,/#\-]+)", regex::escape(phrase));
        let capture = Regex::new(&pattern)
            .map_err(|e| InvexError::Config(format!("keyword pattern for {phrase:?}: {e}")))?;

        Ok(Self {
            phrase: phrase.to_string(),
            folded: phrase.to_lowercase(),
            capture,
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Case-folded phrase used for containment and similarity scoring.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Keyword-adjacent value capture expression.
    pub fn capture(&self) -> &Regex {
        &self.capture
    }
}

/// One field with its compiled keyword list.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    keywords: Vec<Keyword>,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }
}

/// Immutable table of all fields to extract, in extraction order.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
}

impl FieldRegistry {
    /// Compile a registry from configuration.
    pub fn from_specs(specs: &[FieldSpec]) -> Result<Self, InvexError> {
        let mut fields = Vec::with_capacity(specs.len());

        for spec in specs {
            let name = spec.name.trim();
            if name.is_empty() {
                return Err(InvexError::Config("empty field name".to_string()));
            }
            if spec.keywords.is_empty() {
                return Err(InvexError::Config(format!("field {name:?} has no keywords")));
            }
            if fields.iter().any(|f: &FieldDef| f.name == name) {
                return Err(InvexError::Config(format!("duplicate field {name:?}")));
            }

            let keywords = spec
                .keywords
                .iter()
                .map(|phrase| Keyword::compile(phrase))
                .collect::<Result<Vec<_>, _>>()?;

            fields.push(FieldDef {
                name: name.to_string(),
                keywords,
            });
        }

        Ok(Self { fields })
    }

    /// The built-in invoice field set.
    pub fn standard() -> Self {
        Self::from_specs(&Self::standard_specs()).expect("built-in registry compiles")
    }

    /// Specs backing [`FieldRegistry::standard`], useful as a template for
    /// configured registries.
    pub fn standard_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new(
                "Invoice No",
                &["Invoice No", "Invoice #", "Invoice ID", "Bill No", "Bill #", "Ref No", "Ref ID"],
            ),
            FieldSpec::new(
                "Invoice Date",
                &["Invoice Date", "Bill Date", "Date of Invoice", "Date"],
            ),
            FieldSpec::new("Due Date", &["Due Date", "Payment Due", "Payment Date"]),
            FieldSpec::new(
                "Subtotal",
                &["Subtotal", "Amount Before Tax", "Total Before Tax"],
            ),
            FieldSpec::new("Tax", &["Tax", "GST", "VAT", "Tax Amount"]),
            FieldSpec::new("Total", &["Total Amount", "Grand Total", "Total"]),
            FieldSpec::new("Currency", &["INR", "USD", "EUR", "$", "₹", "€"]),
            FieldSpec::new("Vendor", &["From", "Vendor", "Supplier", "Seller"]),
            FieldSpec::new("Customer", &["To", "Bill To", "Customer", "Buyer"]),
        ]
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Field names in extraction order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
