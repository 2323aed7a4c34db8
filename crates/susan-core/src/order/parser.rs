//! Order assembler combining rule extraction and directory matching.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::SusanError;
use crate::models::config::ExtractionConfig;
use crate::models::directory::{DirectoryEntry, DirectorySnapshot};
use crate::models::order::{BusinessRef, DraftItem, ParsedOrderDraft};

use super::matcher::{match_business, match_entry};
use super::rules::{
    BusinessNameExtractor, DateExtractor, FieldExtractor, ItemExtractor, ItemMention,
    MemoExtractor, UnitTable,
};
use super::validator::OrderValidator;
use super::Result;

/// Result of order extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Validated draft ready for operator review.
    pub draft: ParsedOrderDraft,
    /// Fields that could not be resolved, for display next to the form.
    pub warnings: Vec<String>,
}

/// Trait for order text parsing.
pub trait OrderParser {
    /// Parse order text against a directory snapshot.
    fn parse(&self, text: &str, snapshot: &DirectorySnapshot) -> Result<ParseResult>;
}

/// Rule-based order text parser.
///
/// Stateless apart from its configured tables and reference date, so the
/// same text and snapshot always produce the same draft.
pub struct OrderTextParser {
    items: ItemExtractor,
    businesses: BusinessNameExtractor,
    memo: MemoExtractor,
    default_prices: BTreeMap<String, Decimal>,
    validator: OrderValidator,
    reference_date: NaiveDate,
}

impl OrderTextParser {
    /// Create a parser with the built-in tables, resolving dates against today.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
            .expect("built-in extraction tables compile")
    }

    /// Create a parser from configured tables.
    pub fn from_config(config: &ExtractionConfig) -> std::result::Result<Self, SusanError> {
        Ok(Self {
            items: ItemExtractor::new(UnitTable::new(config.unit_synonyms.clone()))?,
            businesses: BusinessNameExtractor::new(&config.business_suffixes)?,
            memo: MemoExtractor::new(),
            default_prices: config.default_prices.clone(),
            validator: OrderValidator::new(config.default_delivery_days),
            reference_date: Local::now().date_naive(),
        })
    }

    /// Set the date that spoken dates and the default delivery date are
    /// resolved against.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    fn assemble_item(
        &self,
        mention: ItemMention,
        snapshot: &DirectorySnapshot,
        warnings: &mut Vec<String>,
    ) -> DraftItem {
        let matched = match_entry(&mention.name, &snapshot.fish_types);
        if matched.is_none() {
            warnings.push(format!("No catalog match for item '{}'", mention.name));
        }

        let (item_ref_id, name) = match matched {
            Some(m) => (Some(m.entry.entry_id()), m.entry.name().to_string()),
            None => (None, mention.name.clone()),
        };

        let unit_price = self
            .default_prices
            .get(&name)
            .or_else(|| self.default_prices.get(&mention.name))
            .copied()
            .unwrap_or(Decimal::ZERO);

        DraftItem {
            item_ref_id,
            name,
            quantity: mention.quantity,
            unit: mention.unit,
            unit_price: Some(unit_price),
        }
    }

    fn resolve_business(
        &self,
        text: &str,
        snapshot: &DirectorySnapshot,
        warnings: &mut Vec<String>,
    ) -> Option<BusinessRef> {
        let candidates: Vec<String> = self
            .businesses
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let matched = match_business(text, &candidates, &snapshot.businesses);
        if matched.is_none() {
            match candidates.first() {
                Some(name) => warnings.push(format!("No directory match for business '{name}'")),
                None => warnings.push("Could not identify the ordering business".to_string()),
            }
        }

        matched.map(|m| BusinessRef {
            id: m.entry.entry_id(),
            name: m.entry.name().to_string(),
        })
    }
}

impl Default for OrderTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderParser for OrderTextParser {
    fn parse(&self, text: &str, snapshot: &DirectorySnapshot) -> Result<ParseResult> {
        let mut warnings = Vec::new();

        info!(
            chars = text.chars().count(),
            fish_types = snapshot.fish_types.len(),
            businesses = snapshot.businesses.len(),
            "Parsing order text"
        );

        let mut draft = ParsedOrderDraft::new(text);

        // Items, in discovery order
        for mention in self.items.extract_all(text) {
            let item = self.assemble_item(mention.value, snapshot, &mut warnings);
            draft.items.push(item);
        }

        draft.matched_business = self.resolve_business(text, snapshot, &mut warnings);

        // Delivery date
        match DateExtractor::new(self.reference_date).extract(text) {
            Some(found) => {
                draft.delivery_date = Some(found.value.date);
                draft.delivery_time = found.value.time;
            }
            None => warnings.push("No delivery date found; using the default".to_string()),
        }

        // Memo
        let memos = self.memo.extract_all(text);
        if memos.len() > 1 {
            debug!(ignored = memos.len() - 1, "Additional memo phrases ignored");
        }
        draft.memo = memos.into_iter().next().map(|m| m.value);

        let draft = self.validator.validate(draft, self.reference_date)?;

        debug!(
            items = draft.items.len(),
            business = draft.matched_business.as_ref().map(|b| b.name.as_str()),
            delivery_date = %draft.delivery_date.map(|d| d.to_string()).unwrap_or_default(),
            "Assembled order draft"
        );

        Ok(ParseResult { draft, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::models::directory::{Business, FishType};
    use pretty_assertions::assert_eq;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn parser() -> OrderTextParser {
        OrderTextParser::new().with_reference_date(reference())
    }

    fn snapshot() -> DirectorySnapshot {
        DirectorySnapshot::new(
            vec![
                FishType::new(1, "고등어"),
                FishType::new(2, "갈치"),
                FishType::new(3, "방어"),
                FishType::new(4, "오징어"),
            ],
            vec![Business::new(10, "동해수산"), Business::new(11, "부산상회")],
        )
    }

    #[test]
    fn test_parse_urgent_order() {
        let text = "고등어 50박스, 갈치 30박스 주문해주세요. 급한 주문입니다.";
        let result = parser().parse(text, &snapshot()).unwrap();
        let draft = result.draft;

        assert_eq!(draft.transcribed_text, text);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].name, "고등어");
        assert_eq!(draft.items[0].item_ref_id, Some(1));
        assert_eq!(draft.items[0].quantity, Decimal::from(50));
        assert_eq!(draft.items[0].unit, "박스");
        assert_eq!(draft.items[1].name, "갈치");
        assert_eq!(draft.items[1].quantity, Decimal::from(30));
        assert_eq!(draft.delivery_date, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(draft.memo.as_deref(), Some("급한 주문입니다"));
        assert!(draft.matched_business.is_none());
    }

    #[test]
    fn test_unmatched_item_is_still_recorded() {
        let result = parser()
            .parse("방어 5마리", &DirectorySnapshot::default())
            .unwrap();
        let item = &result.draft.items[0];

        assert_eq!(item.item_ref_id, None);
        assert_eq!(item.name, "방어");
        assert_eq!(item.quantity, Decimal::from(5));
        assert_eq!(item.unit, "마리");
        assert!(result.draft.matched_business.is_none());
        assert!(result.warnings.iter().any(|w| w.contains("방어")));
    }

    #[test]
    fn test_no_items_is_rejected() {
        let err = parser()
            .parse("내일 다시 전화드릴게요", &snapshot())
            .unwrap_err();
        assert_eq!(err, ExtractionError::NoItems);
    }

    #[test]
    fn test_item_after_date_or_clock_fragment_is_not_lost() {
        let result = parser().parse("11월 2일고등어 5박스", &snapshot()).unwrap();
        assert_eq!(result.draft.items.len(), 1);
        assert_eq!(result.draft.items[0].item_ref_id, Some(1));
        assert_eq!(result.draft.delivery_date, NaiveDate::from_ymd_opt(2026, 11, 2));

        let result = parser()
            .parse("오후3시까지고등어 5박스 갈치 2박스", &snapshot())
            .unwrap();
        let ids: Vec<Option<i64>> = result.draft.items.iter().map(|i| i.item_ref_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_business_date_and_prices() {
        let text = "동해수산입니다. 11월 2일 오전 7시까지 오징어 20킬로, 전복 3바구니 보내주세요";
        let draft = parser().parse(text, &snapshot()).unwrap().draft;

        assert_eq!(
            draft.matched_business,
            Some(BusinessRef {
                id: 10,
                name: "동해수산".to_string()
            })
        );
        assert_eq!(draft.delivery_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(draft.delivery_time, chrono::NaiveTime::from_hms_opt(7, 0, 0));
        assert_eq!(draft.memo.as_deref(), Some("오전 7시까지 오징어 20킬로, 전복 3바구니 보내주세요"));

        assert_eq!(draft.items[0].unit, "kg");
        assert_eq!(draft.items[0].unit_price, Some(Decimal::from(12_000)));
        // 전복 is priced by its spoken name even without a catalog entry
        assert_eq!(draft.items[1].item_ref_id, None);
        assert_eq!(draft.items[1].unit_price, Some(Decimal::from(50_000)));
    }

    #[test]
    fn test_unpriced_item_defaults_to_zero() {
        let draft = parser()
            .parse("참소라 2킬로", &DirectorySnapshot::default())
            .unwrap()
            .draft;
        assert_eq!(draft.items[0].unit_price, Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "부산상회 고등어 10박스 갈치 5박스 12월 1일 손질 부탁드립니다";
        let parser = parser();
        let snapshot = snapshot();

        let first = parser.parse(text, &snapshot).unwrap();
        let second = parser.parse(text, &snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configured_delivery_days() {
        let config = ExtractionConfig {
            default_delivery_days: 1,
            ..ExtractionConfig::default()
        };
        let parser = OrderTextParser::from_config(&config)
            .unwrap()
            .with_reference_date(reference());

        let draft = parser.parse("광어 2마리", &snapshot()).unwrap().draft;
        assert_eq!(draft.delivery_date, NaiveDate::from_ymd_opt(2026, 10, 16));
    }
}
