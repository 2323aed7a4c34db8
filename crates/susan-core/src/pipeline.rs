//! Two-phase order pipeline: fetch the directory, then parse.
//!
//! Phase one loads both directory lists concurrently and can be cancelled
//! when the caller goes away. A list that fails to load degrades to an
//! empty one, so matching falls through to "no match" instead of failing
//! the parse. Phase two is the synchronous parser over the fixed snapshot.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::directory::DirectorySource;
use crate::error::{DirectoryError, Result, SusanError};
use crate::models::directory::DirectorySnapshot;
use crate::order::{OrderParser, OrderTextParser, ParseResult};

/// Fetch-then-parse pipeline over a directory source.
pub struct OrderPipeline<S> {
    source: S,
    parser: OrderTextParser,
}

impl<S: DirectorySource> OrderPipeline<S> {
    pub fn new(source: S, parser: OrderTextParser) -> Self {
        Self { source, parser }
    }

    pub fn into_parser(self) -> OrderTextParser {
        self.parser
    }

    /// Phase one: load both directory lists.
    pub async fn load_snapshot(&self, cancel: &CancellationToken) -> Result<DirectorySnapshot> {
        let fetch = async {
            tokio::join!(self.source.fetch_fish_types(), self.source.fetch_businesses())
        };

        let (fish_types, businesses) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Directory fetch cancelled");
                return Err(SusanError::Cancelled);
            }
            lists = fetch => lists,
        };

        Ok(DirectorySnapshot::new(
            or_empty("fish types", fish_types),
            or_empty("businesses", businesses),
        ))
    }

    /// Phase two: parse text against an already loaded snapshot.
    pub fn parse(&self, text: &str, snapshot: &DirectorySnapshot) -> Result<ParseResult> {
        Ok(self.parser.parse(text, snapshot)?)
    }

    /// Run both phases.
    pub async fn run(&self, text: &str, cancel: &CancellationToken) -> Result<ParseResult> {
        let snapshot = self.load_snapshot(cancel).await?;
        if cancel.is_cancelled() {
            return Err(SusanError::Cancelled);
        }
        self.parse(text, &snapshot)
    }
}

fn or_empty<T>(what: &str, result: std::result::Result<Vec<T>, DirectoryError>) -> Vec<T> {
    match result {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Failed to load {}; matching against an empty list", what);
            Vec::new()
        }
    }
}
