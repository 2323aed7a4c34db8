//! Batch command - parse many order text files against one directory snapshot.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use susan_core::{DirectorySnapshot, OrderParser, OrderTextParser, ParsedOrderDraft};

use super::parse::{format_draft, OutputFormat};
use super::{build_parser, load_config, load_snapshot, DirectoryArgs};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "orders/*.txt")
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file drafts
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

    /// Fish-type catalog as JSON
    #[arg(long)]
    fish_types: Option<PathBuf>,

    /// Business directory as JSON
    #[arg(long)]
    businesses: Option<PathBuf>,

    /// Fetch the directory from the configured backend
    #[arg(long, conflicts_with_all = ["fish_types", "businesses"])]
    remote: bool,

    /// Resolve spoken dates against this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// Result of parsing a single file.
struct ParseOutcome {
    path: PathBuf,
    draft: Option<ParsedOrderDraft>,
    warnings: usize,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
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

    // One snapshot for the whole batch
    let parser = build_parser(&config, args.date)?;
    let directory = DirectoryArgs {
        fish_types: args.fish_types.as_deref(),
        businesses: args.businesses.as_deref(),
        remote: args.remote,
    };
    let (snapshot, parser) = load_snapshot(&directory, &config, parser).await?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match parse_file(&path, &parser, &snapshot) {
            Ok((draft, warnings)) => {
                results.push(ParseOutcome {
                    path,
                    draft: Some(draft),
                    warnings,
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to parse {}: {}", path.display(), error_msg);
                    results.push(ParseOutcome {
                        path,
                        draft: None,
                        warnings: 0,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to parse {}: {}", path.display(), error_msg);
                    anyhow::bail!("Parsing {} failed: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.draft.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(draft) = &result.draft else { continue };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("order");

            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_draft(draft, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
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

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
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

fn parse_file(
    path: &PathBuf,
    parser: &OrderTextParser,
    snapshot: &DirectorySnapshot,
) -> anyhow::Result<(ParsedOrderDraft, usize)> {
    let text = fs::read_to_string(path)?;
    let result = parser.parse(text.trim(), snapshot)?;
    Ok((result.draft, result.warnings.len()))
}

fn write_summary(path: &PathBuf, results: &[ParseOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "items",
        "unmatched_items",
        "business",
        "delivery_date",
        "estimated_total",
        "warnings",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(draft) = &result.draft {
            wtr.write_record([
                filename,
                "success",
                &draft.items.len().to_string(),
                &draft.unmatched_items().count().to_string(),
                &draft
                    .matched_business
                    .as_ref()
                    .map(|b| b.name.clone())
                    .unwrap_or_default(),
                &draft.delivery_date.map(|d| d.to_string()).unwrap_or_default(),
                &draft.estimated_total().to_string(),
                &result.warnings.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
