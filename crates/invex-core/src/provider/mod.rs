//! Text providers: turn a source document into recoverable text.
//!
//! Providers sit strictly outside the extraction engine. On failure the
//! lossy path degrades to a marked diagnostic string, which the engine
//! treats as ordinary text and resolves to sentinel-filled results.

mod ocr;

pub use ocr::OcrCli;

use std::path::Path;

use tracing::warn;

use crate::error::ProviderError;

/// Marker prefixing diagnostic text produced when recovery fails.
pub const WARNING_MARKER: &str = "⚠️";

/// Whether recovered text is a provider diagnostic rather than content.
///
/// Callers may use this for a sharper signal; the engine itself never
/// distinguishes diagnostic text from real content.
pub fn is_diagnostic(text: &str) -> bool {
    text.trim_start().starts_with(WARNING_MARKER)
}

/// Classification of a source document by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// PDF document.
    Pdf,
    /// Raster image.
    Image,
    /// Anything else; rejected before any processing.
    Unsupported,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "bmp" | "tiff" | "tif" => Self::Image,
            _ => Self::Unsupported,
        }
    }

    /// Extensions accepted for batch glob filtering.
    pub fn is_supported(path: &Path) -> bool {
        !matches!(Self::from_path(path), Self::Unsupported)
    }
}

/// Trait for recovering text from a source document.
pub trait TextProvider {
    /// Recover text from the document at `path`.
    fn recover_text(&self, path: &Path, kind: SourceKind) -> Result<String, ProviderError>;

    /// Recover text, degrading a provider failure to a diagnostic string so
    /// multi-document callers are never interrupted.
    fn recover_text_lossy(&self, path: &Path, kind: SourceKind) -> String {
        match self.recover_text(path, kind) {
            Ok(text) => text,
            Err(e) => {
                warn!("Text recovery failed for {}: {}", path.display(), e);
                let what = match kind {
                    SourceKind::Pdf => "PDF",
                    SourceKind::Image => "image",
                    SourceKind::Unsupported => "file",
                };
                format!("{} Error reading {}: {}", WARNING_MARKER, what, e)
            }
        }
    }
}
