//! End-to-end pipeline: classify the source, recover text, extract fields.

use std::path::Path;

use tracing::info;

use crate::error::{ExtractionError, Result};
use crate::extract::FieldEngine;
use crate::models::fields::DocumentFields;
use crate::provider::{SourceKind, TextProvider};

/// Ties a text provider to an extraction engine.
///
/// An unsupported source kind short-circuits to the error variant before any
/// provider or engine work. Provider failures degrade to diagnostic text and
/// still produce a (sentinel-filled) field mapping, so batch callers are
/// never interrupted by a bad document.
pub struct DocumentPipeline<P> {
    provider: P,
    engine: FieldEngine,
}

impl<P: TextProvider> DocumentPipeline<P> {
    pub fn new(provider: P, engine: FieldEngine) -> Self {
        Self { provider, engine }
    }

    pub fn engine(&self) -> &FieldEngine {
        &self.engine
    }

    /// Process one document from disk.
    pub fn process(&self, path: &Path) -> Result<DocumentFields> {
        let kind = SourceKind::from_path(path);
        if kind == SourceKind::Unsupported {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            return Err(ExtractionError::UnsupportedKind { extension }.into());
        }

        info!("Processing {} ({:?})", path.display(), kind);
        let text = self.provider.recover_text_lossy(path, kind);
        Ok(self.engine.extract(&text))
    }
}
