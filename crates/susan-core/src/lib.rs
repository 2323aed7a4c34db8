//! Core library for fisheries order text extraction.
//!
//! This crate provides:
//! - Rule-based extraction of `<item><quantity><unit>` triples, delivery dates and memos
//! - Matching of extracted names against fish-type and business directory snapshots
//! - Assembly and validation of order drafts for human review
//! - A directory client and a fetch-then-parse pipeline (`native` feature)

pub mod error;
pub mod models;
pub mod order;
#[cfg(feature = "native")]
pub mod directory;
#[cfg(feature = "native")]
pub mod pipeline;

pub use error::{DirectoryError, ExtractionError, Result, SusanError};
pub use models::config::SusanConfig;
pub use models::directory::{Business, DirectoryEntry, DirectorySnapshot, FishType, ListResponse};
pub use models::order::{BusinessRef, DraftItem, ParsedOrderDraft};
pub use order::{OrderParser, OrderTextParser, ParseResult};

#[cfg(feature = "native")]
pub use directory::{DirectorySource, HttpDirectory};
#[cfg(feature = "native")]
pub use pipeline::OrderPipeline;
