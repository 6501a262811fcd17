//! Text recovery through external OCR tooling.
//!
//! Executable locations come from [`ProviderConfig`]; nothing here is
//! hard-coded. PDFs prefer their embedded text layer and fall back to
//! rasterize-then-OCR.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use super::{SourceKind, TextProvider};
use crate::error::ProviderError;
use crate::models::config::ProviderConfig;

/// Provider invoking the configured `tesseract` / `pdftoppm` executables.
pub struct OcrCli {
    config: ProviderConfig,
}

impl OcrCli {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// OCR a single raster image to text.
    fn ocr_image(&self, path: &Path) -> Result<String, ProviderError> {
        let output = Command::new(&self.config.tesseract_path)
            .arg(path)
            .arg("stdout")
            .output()
            .map_err(|source| ProviderError::Launch {
                tool: self.config.tesseract_path.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::Tool {
                tool: self.config.tesseract_path.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Embedded PDF text layer, when present.
    fn pdf_text_layer(&self, path: &Path) -> Result<String, ProviderError> {
        pdf_extract::extract_text(path).map_err(|e| ProviderError::TextLayer(e.to_string()))
    }

    /// Rasterize PDF pages into a staging directory and OCR each page.
    fn ocr_pdf_pages(&self, path: &Path) -> Result<String, ProviderError> {
        let staging = tempfile::tempdir()?;
        let prefix = staging.path().join("page");

        let mut command = Command::new(&self.config.pdftoppm_path);
        command
            .arg("-png")
            .arg("-r")
            .arg(self.config.render_dpi.to_string());
        if self.config.max_pages > 0 {
            command
                .arg("-f")
                .arg("1")
                .arg("-l")
                .arg(self.config.max_pages.to_string());
        }
        command.arg(path).arg(&prefix);

        let output = command.output().map_err(|source| ProviderError::Launch {
            tool: self.config.pdftoppm_path.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(ProviderError::Tool {
                tool: self.config.pdftoppm_path.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let mut pages: Vec<PathBuf> = std::fs::read_dir(staging.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(ProviderError::NoPages(path.to_path_buf()));
        }

        debug!("Rasterized {} pages from {}", pages.len(), path.display());

        let mut page_texts = Vec::with_capacity(pages.len());
        for page in &pages {
            match self.ocr_image(page) {
                Ok(text) if !text.trim().is_empty() => page_texts.push(text),
                Ok(_) => debug!("No text detected on {}", page.display()),
                Err(e) => warn!("OCR failed for {}: {}", page.display(), e),
            }
        }

        if page_texts.is_empty() {
            return Err(ProviderError::NoPages(path.to_path_buf()));
        }

        Ok(page_texts.join("\n"))
    }

    fn recover_pdf(&self, path: &Path) -> Result<String, ProviderError> {
        if self.config.prefer_embedded_text {
            match self.pdf_text_layer(path) {
                Ok(text) if text.trim().len() >= self.config.min_text_length => {
                    debug!("Using embedded text layer of {}", path.display());
                    return Ok(text);
                }
                Ok(_) => debug!("Embedded text layer too short, falling back to OCR"),
                Err(e) => debug!("No usable text layer ({}), falling back to OCR", e),
            }
        }

        self.ocr_pdf_pages(path)
    }
}

impl TextProvider for OcrCli {
    fn recover_text(&self, path: &Path, kind: SourceKind) -> Result<String, ProviderError> {
        match kind {
            SourceKind::Pdf => self.recover_pdf(path),
            SourceKind::Image => self.ocr_image(path),
            SourceKind::Unsupported => Err(ProviderError::NoRoute),
        }
    }
}
