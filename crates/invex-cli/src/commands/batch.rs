//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invex_core::{DocumentFields, SourceKind};

use super::{build_pipeline, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file. The batch owns the collected records
/// and hands them by reference to the summary writer.
struct BatchRecord {
    path: PathBuf,
    fields: Option<DocumentFields>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = build_pipeline(&config)?;

    // Expand glob pattern over supported extensions
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceKind::is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = pipeline.process(&path);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(fields) => {
                records.push(BatchRecord {
                    path,
                    fields: Some(fields),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    records.push(BatchRecord {
                        path,
                        fields: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = records.iter().filter(|r| r.fields.is_some()).collect();
    let failed: Vec<_> = records.iter().filter(|r| r.error.is_some()).collect();

    for record in &successful {
        if let (Some(fields), Some(output_dir)) = (&record.fields, &args.output_dir) {
            let output_name = record
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");

            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = super::process::format_fields(fields, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &records, pipeline.engine().registry().names())?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for record in &failed {
            println!(
                "  - {}: {}",
                record.path.display(),
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Summary CSV: one row per file, field columns in registry order.
fn write_summary<'a>(
    path: &PathBuf,
    records: &[BatchRecord],
    field_names: impl Iterator<Item = &'a str>,
) -> anyhow::Result<()> {
    let field_names: Vec<&str> = field_names.collect();
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(&field_names);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for record in records {
        let filename = record
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = record.processing_time_ms.to_string();

        let mut row: Vec<&str> = Vec::with_capacity(field_names.len() + 4);
        if let Some(fields) = &record.fields {
            row.push(filename);
            row.push("success");
            for name in &field_names {
                row.push(fields.display_value(name));
            }
            row.push(&time);
            row.push("");
        } else {
            row.push(filename);
            row.push("error");
            for _ in &field_names {
                row.push("");
            }
            row.push(&time);
            row.push(record.error.as_deref().unwrap_or(""));
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
