//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod parse;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use susan_core::models::config::SusanConfig;
use susan_core::{DirectorySnapshot, HttpDirectory, ListResponse, OrderPipeline, OrderTextParser};

/// Where directory lists come from.
pub struct DirectoryArgs<'a> {
    pub fish_types: Option<&'a Path>,
    pub businesses: Option<&'a Path>,
    pub remote: bool,
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SusanConfig> {
    if let Some(path) = config_path {
        return Ok(SusanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(SusanConfig::from_file(&default_path)?)
    } else {
        Ok(SusanConfig::default())
    }
}

pub fn build_parser(config: &SusanConfig, date: Option<NaiveDate>) -> anyhow::Result<OrderTextParser> {
    let parser = OrderTextParser::from_config(&config.extraction)?;
    Ok(match date {
        Some(date) => parser.with_reference_date(date),
        None => parser,
    })
}

/// Load a directory snapshot from JSON files or the configured backend.
pub async fn load_snapshot(
    args: &DirectoryArgs<'_>,
    config: &SusanConfig,
    parser: OrderTextParser,
) -> anyhow::Result<(DirectorySnapshot, OrderTextParser)> {
    if args.remote {
        let source = HttpDirectory::new(config.directory.clone())?;
        let pipeline = OrderPipeline::new(source, parser);

        let cancel = CancellationToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_ctrl_c.cancel();
            }
        });

        info!("Fetching directory from {}", config.directory.base_url);
        let snapshot = pipeline.load_snapshot(&cancel).await?;
        return Ok((snapshot, pipeline.into_parser()));
    }

    let mut snapshot = DirectorySnapshot::default();
    if let Some(path) = args.fish_types {
        snapshot.fish_types = read_list(path)?;
    }
    if let Some(path) = args.businesses {
        snapshot.businesses = read_list(path)?;
    }
    Ok((snapshot, parser))
}

/// Read a saved listing response (array, page envelope or data wrapper).
fn read_list<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let listing: ListResponse<T> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Unrecognized directory listing in {}: {}", path.display(), e))?;
    Ok(listing.into_entries())
}
