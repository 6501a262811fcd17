//! Error types for the invex-core library.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// Text provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to recovering text from a source document.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Failed to launch an external tool.
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited with a non-zero status.
    #[error("{tool} exited with {status}: {stderr}")]
    Tool {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Failed to read the embedded PDF text layer.
    #[error("failed to read text layer: {0}")]
    TextLayer(String),

    /// Rasterization produced no page images.
    #[error("no pages rendered from {}", .0.display())]
    NoPages(PathBuf),

    /// The source kind has no provider route.
    #[error("no provider for this source kind")]
    NoRoute,

    /// I/O error while staging intermediate files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to field extraction.
///
/// Absence of a field is not an error; it resolves to the sentinel value.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input file kind is not one the system accepts.
    #[error("unsupported file type: {extension}")]
    UnsupportedKind { extension: String },
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
