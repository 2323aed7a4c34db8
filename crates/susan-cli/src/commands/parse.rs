//! Parse command - turn one order text into a draft.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use susan_core::{OrderParser, ParsedOrderDraft};

use super::{build_parser, load_config, load_snapshot, DirectoryArgs};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Order text (read from stdin when neither text nor --input is given)
    text: Option<String>,

    /// Read the order text from a file
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

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

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print unresolved fields to stderr
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_text(&args)?;
    if text.trim().is_empty() {
        anyhow::bail!("No order text given");
    }

    let parser = build_parser(&config, args.date)?;
    let directory = DirectoryArgs {
        fish_types: args.fish_types.as_deref(),
        businesses: args.businesses.as_deref(),
        remote: args.remote,
    };
    let (snapshot, parser) = load_snapshot(&directory, &config, parser).await?;
    info!(
        "Directory snapshot: {} fish types, {} businesses",
        snapshot.fish_types.len(),
        snapshot.businesses.len()
    );
    if snapshot.is_empty() {
        warn!("Directory snapshot is empty; items and business will be left unmatched");
    }

    let result = parser.parse(text.trim(), &snapshot)?;

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Unresolved fields:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_draft(&result.draft, args.format)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_text(args: &ParseArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.input {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        return Ok(fs::read_to_string(path)?);
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

pub fn format_draft(draft: &ParsedOrderDraft, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
        OutputFormat::Csv => format_csv(draft),
        OutputFormat::Text => Ok(format_text(draft)),
    }
}

fn format_csv(draft: &ParsedOrderDraft) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "item_ref_id",
        "name",
        "quantity",
        "unit",
        "unit_price",
        "delivery_date",
        "business",
        "memo",
    ])?;

    let delivery_date = draft.delivery_date.map(|d| d.to_string()).unwrap_or_default();
    let business = draft
        .matched_business
        .as_ref()
        .map(|b| b.name.clone())
        .unwrap_or_default();
    let memo = draft.memo.clone().unwrap_or_default();

    for item in &draft.items {
        wtr.write_record([
            &item.item_ref_id.map(|id| id.to_string()).unwrap_or_default(),
            &item.name,
            &item.quantity.to_string(),
            &item.unit,
            &item.unit_price.map(|p| p.to_string()).unwrap_or_default(),
            &delivery_date,
            &business,
            &memo,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(draft: &ParsedOrderDraft) -> String {
    let mut output = String::new();

    let business = draft
        .matched_business
        .as_ref()
        .map(|b| format!("{} (#{})", b.name, b.id))
        .unwrap_or_else(|| "-".to_string());
    output.push_str(&format!("Business: {}\n", business));

    match (draft.delivery_date, draft.delivery_time) {
        (Some(date), Some(time)) => output.push_str(&format!("Delivery: {} {}\n", date, time.format("%H:%M"))),
        (Some(date), None) => output.push_str(&format!("Delivery: {}\n", date)),
        _ => output.push_str("Delivery: -\n"),
    }
    output.push('\n');

    output.push_str("Items:\n");
    for item in &draft.items {
        let reference = item
            .item_ref_id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "unmatched".to_string());
        output.push_str(&format!(
            "  {} {} {} ({})\n",
            item.name, item.quantity, item.unit, reference
        ));
    }

    output.push_str(&format!("\nEstimated total: {}\n", draft.estimated_total()));

    if let Some(memo) = &draft.memo {
        output.push_str(&format!("Memo: {}\n", memo));
    }

    output
}
