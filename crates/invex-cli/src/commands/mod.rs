//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use anyhow::Context;
use invex_core::{DocumentPipeline, FieldEngine, InvexConfig, OcrCli};

/// Load configuration from an explicit path or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvexConfig> {
    match config_path {
        Some(path) => InvexConfig::from_file(std::path::Path::new(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => Ok(InvexConfig::default()),
    }
}

/// Build the processing pipeline from configuration.
pub fn build_pipeline(config: &InvexConfig) -> anyhow::Result<DocumentPipeline<OcrCli>> {
    let engine = FieldEngine::from_config(&config.extraction, config.fields.as_deref())?;
    let provider = OcrCli::new(config.provider.clone());
    Ok(DocumentPipeline::new(provider, engine))
}
