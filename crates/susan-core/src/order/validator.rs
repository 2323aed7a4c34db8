//! Draft validation.

use chrono::{Duration, NaiveDate};

use super::Result;
use crate::error::ExtractionError;
use crate::models::order::ParsedOrderDraft;

/// Rejects empty drafts and fills in a default delivery date.
///
/// Prices, quantities and units are left as extracted; the operator reviews
/// every field before submission.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    default_delivery_days: i64,
}

impl OrderValidator {
    pub fn new(default_delivery_days: i64) -> Self {
        Self {
            default_delivery_days,
        }
    }

    pub fn validate(
        &self,
        mut draft: ParsedOrderDraft,
        reference: NaiveDate,
    ) -> Result<ParsedOrderDraft> {
        if draft.items.is_empty() {
            return Err(ExtractionError::NoItems);
        }

        if draft.delivery_date.is_none() {
            let date = Duration::try_days(self.default_delivery_days)
                .and_then(|days| reference.checked_add_signed(days))
                .ok_or_else(|| ExtractionError::Validation {
                    field: "delivery_date".to_string(),
                    reason: format!(
                        "{} + {} days is out of range",
                        reference, self.default_delivery_days
                    ),
                })?;
            draft.delivery_date = Some(date);
        }

        Ok(draft)
    }
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(3)
    }
}
