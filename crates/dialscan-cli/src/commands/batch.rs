//! Batch processing command for multiple files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use dialscan_core::models::config::DialscanConfig;
use dialscan_core::{ContactParser, ContactSummary, ExtractedContact, PureOcrEngine};

use super::process::{format_contacts, OutputFormat};
use super::{extract_file, load_config, load_engine, InputKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern, e.g. "shots/*.png"
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Drop contacts scoring below this confidence (0.0 - 1.0)
    #[arg(long)]
    min_confidence: Option<f32>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    contacts: Option<Vec<ExtractedContact>>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(min_confidence) = args.min_confidence {
        config.extraction.min_confidence = min_confidence;
    }

    // Expand glob pattern
    let files: Vec<(PathBuf, InputKind)> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter_map(|p| InputKind::from_path(&p).map(|kind| (p, kind)))
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

    let parser = ContactParser::from_config(&config.extraction)?;
    let engine = load_engine_if_needed(&files, &args, &config)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for (path, kind) in files {
        let file_start = Instant::now();
        let result = extract_file(&path, kind, &parser, engine.as_ref(), |_| {});
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(contacts) => {
                debug!("{}: {} contacts", path.display(), contacts.len());
                results.push(ProcessResult {
                    path,
                    contacts: Some(contacts),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        contacts: None,
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

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &results, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<_> = results.iter().filter(|r| r.contacts.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_contacts: usize = successful
        .iter()
        .filter_map(|r| r.contacts.as_ref())
        .map(Vec::len)
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} contacts found",
        style(successful.len()).green(),
        style(failed.len()).red(),
        total_contacts
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Load the OCR engine once, and only when some input needs it.
fn load_engine_if_needed(
    files: &[(PathBuf, InputKind)],
    args: &BatchArgs,
    config: &DialscanConfig,
) -> anyhow::Result<Option<PureOcrEngine>> {
    if !files.iter().any(|(_, kind)| *kind == InputKind::Image) {
        return Ok(None);
    }

    match load_engine(args.model_dir.as_deref(), config) {
        Ok(engine) => Ok(Some(engine)),
        // Text inputs can still be processed
        Err(e) if args.continue_on_error => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn write_outputs(output_dir: &Path, results: &[ProcessResult], format: OutputFormat) -> anyhow::Result<()> {
    for result in results {
        let Some(contacts) = &result.contacts else {
            continue;
        };

        let output_name = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("contacts");

        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
        fs::write(&output_path, format_contacts(contacts, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "contacts_found",
        "valid",
        "average_confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        if let Some(contacts) = &result.contacts {
            let summary = ContactSummary::from_contacts(contacts);
            let total = summary.total.to_string();
            let valid = summary.valid.to_string();
            let confidence = format!("{:.2}", summary.average_confidence);

            wtr.write_record([
                filename,
                "success",
                total.as_str(),
                valid.as_str(),
                confidence.as_str(),
                time_ms.as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                time_ms.as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
