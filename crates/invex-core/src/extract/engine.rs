//! Extraction engine: drives the line matcher over a document for every
//! registered field, then runs the corrective pass.

use tracing::{debug, info};

use super::corrective;
use super::matcher::{match_line, MatchPolicy};
use super::registry::{FieldDef, FieldRegistry, FieldSpec};
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::fields::DocumentFields;
use crate::text::DocumentText;

/// Field extraction engine.
///
/// Immutable after construction; holds no cross-call state, so one engine
/// can serve independent documents from any number of threads.
pub struct FieldEngine {
    registry: FieldRegistry,
    policy: MatchPolicy,
}

impl FieldEngine {
    pub fn new(registry: FieldRegistry, policy: MatchPolicy) -> Self {
        Self { registry, policy }
    }

    /// Build an engine from extraction configuration, with an optional
    /// registry override.
    pub fn from_config(config: &ExtractionConfig, fields: Option<&[FieldSpec]>) -> Result<Self> {
        let registry = match fields {
            Some(specs) => FieldRegistry::from_specs(specs)?,
            None => FieldRegistry::standard(),
        };
        let policy = MatchPolicy {
            similarity_threshold: config.similarity_threshold,
            max_value_len: config.max_value_len,
        };
        Ok(Self::new(registry, policy))
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Extract every registered field from raw recovered text.
    ///
    /// Kind-agnostic: diagnostic or empty text simply yields sentinel-filled
    /// results. Deterministic for identical text, registry, and policy.
    pub fn extract(&self, raw_text: &str) -> DocumentFields {
        let doc = DocumentText::normalize(raw_text);
        info!(
            "Extracting {} fields from {} lines",
            self.registry.len(),
            doc.len()
        );

        let mut fields = DocumentFields::new();
        for field in self.registry.fields() {
            let value = self.extract_field(&doc, field);
            if value.is_none() {
                debug!("No line qualified for {}", field.name());
            }
            fields.insert(field.name(), value);
        }

        corrective::recover_missing(&mut fields, &doc.joined(), &self.policy);

        debug!(
            "Resolved {}/{} fields",
            fields.found_count(),
            fields.len()
        );
        fields
    }

    /// First qualifying line wins; later lines are never considered once an
    /// earlier one qualifies, regardless of score.
    fn extract_field(&self, doc: &DocumentText, field: &FieldDef) -> Option<String> {
        doc.lines()
            .iter()
            .find_map(|line| match_line(line, field, &self.policy))
    }
}
