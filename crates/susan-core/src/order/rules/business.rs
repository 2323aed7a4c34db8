//! Business name candidates: words ending in a trade suffix.

use regex::Regex;

use super::patterns::HANGUL;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::SusanError;

/// Extracts candidate business names such as `동해수산` or `부산상회`.
pub struct BusinessNameExtractor {
    pattern: Option<Regex>,
}

impl BusinessNameExtractor {
    /// Compile the candidate pattern for the given suffixes.
    ///
    /// An empty suffix list yields an extractor that never finds candidates.
    pub fn new(suffixes: &[String]) -> Result<Self, SusanError> {
        let suffixes: Vec<String> = suffixes
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| regex::escape(s))
            .collect();

        if suffixes.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!(
            r"[{HANGUL}A-Za-z0-9]+(?:{})",
            suffixes.join("|")
        ))
        .map_err(|e| SusanError::Config(format!("invalid business suffixes: {e}")))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }
}

impl FieldExtractor for BusinessNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        pattern
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}
