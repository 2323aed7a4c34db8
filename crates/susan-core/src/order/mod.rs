//! Order text extraction module.

mod matcher;
mod parser;
pub mod rules;
mod validator;

pub use matcher::{match_business, match_entry, DirectoryMatch, MatchKind};
pub use parser::{OrderParser, OrderTextParser, ParseResult};
pub use validator::OrderValidator;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
