//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - Text providers for PDF and image sources (external OCR tooling)
//! - Normalization of recovered text into matchable lines
//! - Keyword-driven per-field extraction with fuzzy fallback
//! - Whole-text corrective salvage for high-value fields

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod text;

pub use error::{ExtractionError, InvexError, ProviderError, Result};
pub use extract::{FieldEngine, FieldRegistry, FieldSpec, MatchPolicy};
pub use models::config::{ExtractionConfig, InvexConfig, ProviderConfig};
pub use models::fields::{DocumentFields, NOT_FOUND};
pub use pipeline::DocumentPipeline;
pub use provider::{is_diagnostic, OcrCli, SourceKind, TextProvider, WARNING_MARKER};
pub use text::DocumentText;
