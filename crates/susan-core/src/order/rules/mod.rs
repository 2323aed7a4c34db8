//! Rule-based extractors for spoken or typed order text.

pub mod business;
pub mod dates;
pub mod items;
pub mod memo;
pub mod patterns;

pub use business::BusinessNameExtractor;
pub use dates::{resolve_month_day, DateExtractor, DeliveryDate};
pub use items::{ItemExtractor, ItemMention, UnitTable};
pub use memo::MemoExtractor;
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the highest-priority occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.position.is_some_and(|(s, e)| start < e && s < end)
    }
}
