//! Read-only directory entries fetched from the backend.
//!
//! The backend owns and mutates these lists; the extraction pipeline only
//! reads a snapshot that is held fixed for the duration of one parse call.

use serde::{Deserialize, Serialize};

/// Common view over directory entries used by the matcher.
pub trait DirectoryEntry {
    /// Backend identifier.
    fn entry_id(&self) -> i64;

    /// Canonical display name.
    fn name(&self) -> &str;

    /// Alternative names that count as an exact match.
    fn aliases(&self) -> &[String] {
        &[]
    }
}

/// A fish type from the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishType {
    #[serde(alias = "fishTypeId")]
    pub id: i64,

    #[serde(alias = "fishName")]
    pub name: String,

    /// Default selling unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl FishType {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit: None,
            aliases: Vec::new(),
        }
    }
}

impl DirectoryEntry for FishType {
    fn entry_id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// A customer or supplier from the business directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(alias = "businessId", alias = "customerId")]
    pub id: i64,

    #[serde(alias = "businessName", alias = "name")]
    pub company_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Business {
    pub fn new(id: i64, company_name: impl Into<String>) -> Self {
        Self {
            id,
            company_name: company_name.into(),
            representative: None,
            phone: None,
        }
    }
}

impl DirectoryEntry for Business {
    fn entry_id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.company_name
    }
}

/// Directory lists used for one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub fish_types: Vec<FishType>,

    #[serde(default)]
    pub businesses: Vec<Business>,
}

impl DirectorySnapshot {
    pub fn new(fish_types: Vec<FishType>, businesses: Vec<Business>) -> Self {
        Self {
            fish_types,
            businesses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fish_types.is_empty() && self.businesses.is_empty()
    }
}

/// Accepted shapes of a listing response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// A bare JSON array.
    Plain(Vec<T>),
    /// A paginated envelope (`content`, `last`, `totalPages`).
    Page {
        content: Vec<T>,
        #[serde(default)]
        last: Option<bool>,
        #[serde(default, rename = "totalPages")]
        total_pages: Option<u32>,
    },
    /// A `{ "data": [...] }` wrapper.
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    /// Entries of this response, ignoring paging metadata.
    pub fn into_entries(self) -> Vec<T> {
        self.into_page(0).0
    }

    /// Split into entries and whether another page should be requested.
    pub(crate) fn into_page(self, page: u32) -> (Vec<T>, bool) {
        match self {
            ListResponse::Plain(items) | ListResponse::Wrapped { data: items } => (items, false),
            ListResponse::Page {
                content,
                last,
                total_pages,
            } => {
                let has_more = match (last, total_pages) {
                    (Some(last), _) => !last,
                    (None, Some(total)) => page + 1 < total,
                    (None, None) => false,
                };
                let has_more = has_more && !content.is_empty();
                (content, has_more)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fish_type_accepts_backend_field_names() {
        let json = r#"{"fishTypeId": 7, "fishName": "갈치", "unit": "박스"}"#;
        let fish: FishType = serde_json::from_str(json).unwrap();

        assert_eq!(fish.id, 7);
        assert_eq!(fish.name, "갈치");
        assert_eq!(fish.unit.as_deref(), Some("박스"));
        assert!(fish.aliases.is_empty());
    }

    #[test]
    fn test_business_accepts_name_variants() {
        let a: Business = serde_json::from_str(r#"{"id": 1, "companyName": "동해수산"}"#).unwrap();
        let b: Business = serde_json::from_str(r#"{"businessId": 2, "businessName": "부산상회"}"#).unwrap();

        assert_eq!(a.name(), "동해수산");
        assert_eq!(b.entry_id(), 2);
        assert_eq!(b.name(), "부산상회");
    }

    fn parse(json: &str) -> ListResponse<FishType> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_plain_array() {
        let (items, more) = parse(r#"[{"id": 1, "name": "고등어"}]"#).into_page(0);
        assert_eq!(items.len(), 1);
        assert!(!more);
    }

    #[test]
    fn test_page_envelope_with_last_flag() {
        let json = r#"{"content": [{"id": 1, "name": "고등어"}], "last": false, "totalPages": 3}"#;
        let (items, more) = parse(json).into_page(0);
        assert_eq!(items[0].name, "고등어");
        assert!(more);
    }

    #[test]
    fn test_page_envelope_with_total_pages_only() {
        let json = r#"{"content": [{"id": 1, "name": "갈치"}], "totalPages": 2}"#;
        assert!(parse(json).into_page(0).1);
        assert!(!parse(json).into_page(1).1);
    }

    #[test]
    fn test_empty_page_stops_paging() {
        let json = r#"{"content": [], "last": false}"#;
        assert!(!parse(json).into_page(4).1);
    }

    #[test]
    fn test_data_wrapper() {
        let json = r#"{"data": [{"fishTypeId": 3, "fishName": "방어"}]}"#;
        let (items, more) = parse(json).into_page(0);
        assert_eq!(items[0].id, 3);
        assert!(!more);
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let result: Result<ListResponse<FishType>, _> = serde_json::from_str(r#"{"items": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_is_empty_only_without_any_entries() {
        assert!(DirectorySnapshot::default().is_empty());
        assert!(!DirectorySnapshot::new(Vec::new(), vec![Business::new(1, "동해수산")]).is_empty());
    }
}
