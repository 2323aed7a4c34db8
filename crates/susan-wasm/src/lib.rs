//! WASM bindings for fisheries order text extraction.
//!
//! The host application loads the fish-type catalog and business directory
//! itself and hands them over as plain JS values; parsing runs locally.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use susan_core::{
    Business, DirectorySnapshot, FishType, ListResponse, OrderParser, OrderTextParser,
    ParsedOrderDraft,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse order text against a catalog and business directory.
///
/// Both lists accept a plain array, a paged `{content: [...]}` object or a
/// `{data: [...]}` wrapper. A list that cannot be read is treated as empty.
#[wasm_bindgen]
pub fn parse_order_text(
    text: &str,
    fish_types: JsValue,
    businesses: JsValue,
) -> Result<JsValue, JsValue> {
    OrderExtractor::new().parse(text, fish_types, businesses)
}

/// Order extractor class for browser use.
#[wasm_bindgen]
pub struct OrderExtractor {
    parser: OrderTextParser,
}

#[wasm_bindgen]
impl OrderExtractor {
    /// Create an extractor resolving dates against today.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: OrderTextParser::new(),
        }
    }

    /// Resolve spoken dates against `date` (YYYY-MM-DD) instead of today.
    #[wasm_bindgen]
    pub fn set_reference_date(&mut self, date: &str) -> Result<(), JsValue> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("invalid reference date '{}': {}", date, e)))?;
        let parser = std::mem::take(&mut self.parser);
        self.parser = parser.with_reference_date(date);
        Ok(())
    }

    /// Parse order text and return the draft.
    #[wasm_bindgen]
    pub fn parse(
        &self,
        text: &str,
        fish_types: JsValue,
        businesses: JsValue,
    ) -> Result<JsValue, JsValue> {
        let draft = self.run(text, fish_types, businesses)?.draft;

        serde_wasm_bindgen::to_value(&draft).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Parse order text and return the draft with unresolved-field warnings.
    #[wasm_bindgen]
    pub fn parse_with_warnings(
        &self,
        text: &str,
        fish_types: JsValue,
        businesses: JsValue,
    ) -> Result<JsValue, JsValue> {
        let result = self.run(text, fish_types, businesses)?;

        #[derive(serde::Serialize)]
        struct ParseOutput {
            draft: ParsedOrderDraft,
            warnings: Vec<String>,
        }

        let output = ParseOutput {
            draft: result.draft,
            warnings: result.warnings,
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl OrderExtractor {
    fn run(
        &self,
        text: &str,
        fish_types: JsValue,
        businesses: JsValue,
    ) -> Result<susan_core::ParseResult, JsValue> {
        let snapshot = DirectorySnapshot::new(
            read_list::<FishType>("fish types", fish_types),
            read_list::<Business>("businesses", businesses),
        );

        self.parser
            .parse(text, &snapshot)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_list<T: DeserializeOwned>(what: &str, value: JsValue) -> Vec<T> {
    if value.is_null() || value.is_undefined() {
        return Vec::new();
    }

    match serde_wasm_bindgen::from_value::<ListResponse<T>>(value) {
        Ok(list) => list.into_entries(),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "susan: could not read {}, matching against an empty list: {}",
                what, e
            )));
            Vec::new()
        }
    }
}
