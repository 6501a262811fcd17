//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::FieldSpec;

/// Main configuration for the invex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text provider configuration.
    pub provider: ProviderConfig,

    /// Field registry override. When absent, the built-in invoice fields
    /// are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSpec>>,
}

impl Default for InvexConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            provider: ProviderConfig::default(),
            fields: None,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Similarity score (0-100) a line must strictly exceed to qualify for
    /// a field when no keyword is contained verbatim.
    pub similarity_threshold: f64,

    /// Maximum length of an extracted value, in characters.
    pub max_value_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 80.0,
            max_value_len: 50,
        }
    }
}

/// Text provider configuration.
///
/// Executable paths default from the `INVEX_TESSERACT` / `INVEX_PDFTOPPM`
/// environment variables and fall back to bare command names resolved via
/// `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// OCR executable.
    pub tesseract_path: PathBuf,

    /// PDF rasterizer executable.
    pub pdftoppm_path: PathBuf,

    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Maximum pages to rasterize per PDF (0 = unlimited).
    pub max_pages: usize,

    /// Try the embedded PDF text layer before falling back to OCR.
    pub prefer_embedded_text: bool,

    /// Minimum text length to accept the embedded layer as real content.
    pub min_text_length: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            tesseract_path: env_path("INVEX_TESSERACT", "tesseract"),
            pdftoppm_path: env_path("INVEX_PDFTOPPM", "pdftoppm"),
            render_dpi: 300,
            max_pages: 10,
            prefer_embedded_text: true,
            min_text_length: 50,
        }
    }
}

fn env_path(var: &str, fallback: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback))
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InvexConfig::default();
        assert_eq!(config.extraction.similarity_threshold, 80.0);
        assert_eq!(config.extraction.max_value_len, 50);
        assert!(config.provider.prefer_embedded_text);
        assert!(config.fields.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: InvexConfig =
            serde_json::from_str(r#"{"extraction": {"similarity_threshold": 75.0}}"#).unwrap();
        assert_eq!(config.extraction.similarity_threshold, 75.0);
        assert_eq!(config.extraction.max_value_len, 50);
    }
}
