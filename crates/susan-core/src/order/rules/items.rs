//! `<item><quantity><unit>` extraction.

use std::collections::BTreeMap;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{HANGUL, NON_ORDER_UNIT_MARKERS};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::SusanError;

/// Spoken unit token -> canonical unit lookup.
#[derive(Debug, Clone, Default)]
pub struct UnitTable {
    synonyms: BTreeMap<String, String>,
}

impl UnitTable {
    pub fn new(synonyms: BTreeMap<String, String>) -> Self {
        Self { synonyms }
    }

    /// Canonical unit for a token; unknown tokens pass through verbatim.
    pub fn canonical(&self, token: &str) -> String {
        self.synonyms
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }

    pub fn is_known(&self, token: &str) -> bool {
        self.synonyms.contains_key(token) || self.synonyms.values().any(|v| v == token)
    }

    /// All known tokens, longest first so that `킬로그램` wins over `킬로`.
    fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self
            .synonyms
            .iter()
            .flat_map(|(k, v)| [k.as_str(), v.as_str()])
            .filter(|t| !t.is_empty())
            .collect();
        tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        tokens.dedup();
        tokens
    }
}

/// One `<item><quantity><unit>` mention found in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMention {
    /// Item name as written.
    pub name: String,
    pub quantity: Decimal,
    /// Canonical unit.
    pub unit: String,
    /// Unit token as written.
    pub raw_unit: String,
}

/// Item triple extractor.
pub struct ItemExtractor {
    pattern: Regex,
    units: UnitTable,
}

impl ItemExtractor {
    /// Compile the item pattern for the given unit table.
    pub fn new(units: UnitTable) -> Result<Self, SusanError> {
        let known: Vec<String> = units.tokens().into_iter().map(regex::escape).collect();
        let fallback = format!("[{HANGUL}A-Za-z]+");
        let unit_alternation = if known.is_empty() {
            fallback
        } else {
            format!("{}|{}", known.join("|"), fallback)
        };

        let pattern = Regex::new(&format!(
            r"([{HANGUL}]+)\s*(\d+(?:\.\d+)?)\s*({unit_alternation})"
        ))
        .map_err(|e| SusanError::Config(format!("invalid unit table: {e}")))?;

        Ok(Self { pattern, units })
    }

    fn is_order_unit(&self, raw_unit: &str) -> bool {
        if self.units.is_known(raw_unit) {
            return true;
        }
        !raw_unit
            .chars()
            .next()
            .is_some_and(|c| NON_ORDER_UNIT_MARKERS.contains(&c))
    }
}

impl FieldExtractor for ItemExtractor {
    type Output = ExtractionMatch<ItemMention>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut start = 0;

        while let Some(caps) = self.pattern.captures_at(text, start) {
            let full_match = caps.get(0).unwrap();
            let unit = caps.get(3).unwrap();
            let raw_unit = unit.as_str();

            // `2일고등어` swallows the next item name into the unit, so
            // rescan from just past the marker.
            if !self.is_order_unit(raw_unit) {
                start = unit.start() + raw_unit.chars().next().map_or(1, char::len_utf8);
                continue;
            }
            start = full_match.end();

            let Ok(quantity) = Decimal::from_str(&caps[2]) else {
                continue;
            };

            let mention = ItemMention {
                name: caps[1].to_string(),
                quantity,
                unit: self.units.canonical(raw_unit),
                raw_unit: raw_unit.to_string(),
            };
            results.push(
                ExtractionMatch::new(mention, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}
