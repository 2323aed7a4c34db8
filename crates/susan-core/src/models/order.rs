//! Order draft produced from free-form order text.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A structured order draft handed to the operator for review.
///
/// Drafts are transient: one is built per parse call and discarded once the
/// operator submits or abandons the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOrderDraft {
    /// The raw input text.
    pub transcribed_text: String,

    /// Line items in discovery order.
    pub items: Vec<DraftItem>,

    /// Requested delivery date, serialized as `yyyy-MM-dd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,

    /// Hour that accompanied the delivery date phrase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<NaiveTime>,

    /// Urgency, time or handling request lifted from the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Business the order was placed for, when it could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_business: Option<BusinessRef>,
}

impl ParsedOrderDraft {
    /// Create an empty draft for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            transcribed_text: text.into(),
            items: Vec::new(),
            delivery_date: None,
            delivery_time: None,
            memo: None,
            matched_business: None,
        }
    }

    /// Sum of `quantity * unit_price` over all priced items.
    pub fn estimated_total(&self) -> Decimal {
        self.items.iter().map(DraftItem::line_total).sum()
    }

    /// Items that could not be resolved against the catalog.
    pub fn unmatched_items(&self) -> impl Iterator<Item = &DraftItem> {
        self.items.iter().filter(|i| i.item_ref_id.is_none())
    }
}

/// A single line of an order draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    /// Catalog id of the matched fish type.
    pub item_ref_id: Option<i64>,

    /// Catalog name when matched, otherwise the name as spoken.
    pub name: String,

    /// Ordered quantity.
    pub quantity: Decimal,

    /// Canonical unit (e.g. `kg`, `박스`).
    pub unit: String,

    /// Unit price from the default price table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
}

impl DraftItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price.unwrap_or(Decimal::ZERO) * self.quantity
    }
}

/// Reference to a business directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRef {
    pub id: i64,
    pub name: String,
}
