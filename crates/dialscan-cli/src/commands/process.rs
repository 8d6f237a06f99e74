//! Process command - extract contacts from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use dialscan_core::{ContactParser, ContactSummary, ExtractedContact};

use super::{extract_file, load_config, load_engine, InputKind};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (screenshot or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Drop contacts scoring below this confidence (0.0 - 1.0)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(min_confidence) = args.min_confidence {
        config.extraction.min_confidence = min_confidence;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let Some(kind) = InputKind::from_path(&args.input) else {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    };

    info!("Processing file: {}", args.input.display());

    let parser = ContactParser::from_config(&config.extraction)?;
    let engine = match kind {
        InputKind::Image => Some(load_engine(args.model_dir.as_deref(), &config)?),
        InputKind::Text => None,
    };

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message(match kind {
        InputKind::Image => "Running OCR...",
        InputKind::Text => "Extracting contacts...",
    });

    let contacts = extract_file(&args.input, kind, &parser, engine.as_ref(), |percent| {
        if percent >= 50 {
            pb.set_message("Extracting contacts...");
        }
        pb.set_position(u64::from(percent));
    })?;

    pb.finish_and_clear();

    let output = format_contacts(&contacts, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let summary = ContactSummary::from_contacts(&contacts);
        println!();
        println!(
            "{} Average confidence: {:.1}%",
            style("ℹ").blue(),
            summary.average_confidence * 100.0
        );
        println!(
            "{} Confidence range: {:.1}% - {:.1}%",
            style("ℹ").blue(),
            summary.min_confidence * 100.0,
            summary.max_confidence * 100.0
        );
        for contact in &contacts {
            println!(
                "   {} {:.1}%",
                contact.formatted_number,
                contact.confidence * 100.0
            );
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            start.elapsed().as_millis()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render contacts in the requested format.
pub fn format_contacts(contacts: &[ExtractedContact], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(contacts)?),
        OutputFormat::Csv => format_csv(contacts),
        OutputFormat::Text => Ok(format_text(contacts)),
    }
}

fn format_csv(contacts: &[ExtractedContact]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "phone_number",
        "formatted_number",
        "country_code",
        "confidence_percent",
        "valid",
        "name",
        "email",
        "context",
    ])?;

    for contact in contacts {
        let confidence = format!("{:.0}", contact.confidence * 100.0);
        wtr.write_record([
            contact.phone_number.as_str(),
            contact.formatted_number.as_str(),
            contact.country_code.as_str(),
            confidence.as_str(),
            if contact.is_valid { "yes" } else { "no" },
            contact.name.as_str(),
            contact.email.as_str(),
            contact.context.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(contacts: &[ExtractedContact]) -> String {
    let summary = ContactSummary::from_contacts(contacts);
    let mut output = String::new();

    output.push_str(&format!(
        "Found {} contacts ({} valid, {} invalid)\n",
        summary.total, summary.valid, summary.invalid
    ));

    for (i, contact) in contacts.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!("{}. {}\n", i + 1, contact.formatted_number));
        if !contact.name.is_empty() {
            output.push_str(&format!("   Name:  {}\n", contact.name));
        }
        if !contact.email.is_empty() {
            output.push_str(&format!("   Email: {}\n", contact.email));
        }
        output.push_str(&format!("   Found in: {}\n", contact.context));
    }

    if !summary.by_country.is_empty() {
        output.push_str("\nBy country code:\n");
        for (code, count) in &summary.by_country {
            output.push_str(&format!("  {}: {}\n", code, count));
        }
    }

    output
}
