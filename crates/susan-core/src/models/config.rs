//! Configuration structures for the extraction pipeline.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SusanError};

/// Main configuration for the susan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SusanConfig {
    /// Order text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Directory backend configuration.
    pub directory: DirectoryConfig,
}

/// Lookup tables and defaults used while extracting orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Spoken unit token -> canonical unit.
    pub unit_synonyms: BTreeMap<String, String>,

    /// Fish name -> default unit price.
    pub default_prices: BTreeMap<String, Decimal>,

    /// Days added to the reference date when no delivery date was spoken.
    pub default_delivery_days: i64,

    /// Name endings that mark a business name (e.g. `수산`).
    pub business_suffixes: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let unit_synonyms = [
            ("킬로", "kg"),
            ("키로", "kg"),
            ("킬로그램", "kg"),
            ("kg", "kg"),
            ("KG", "kg"),
            ("그램", "g"),
            ("박스", "박스"),
            ("상자", "박스"),
            ("box", "박스"),
            ("마리", "마리"),
            ("미", "마리"),
            ("개", "개"),
            ("짝", "짝"),
            ("팩", "팩"),
            ("톤", "톤"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let default_prices = [
            ("고등어", 15_000),
            ("갈치", 25_000),
            ("방어", 40_000),
            ("오징어", 12_000),
            ("광어", 30_000),
            ("우럭", 20_000),
            ("삼치", 18_000),
            ("명태", 10_000),
            ("전복", 50_000),
            ("새우", 18_000),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Decimal::from(v)))
        .collect();

        Self {
            unit_synonyms,
            default_prices,
            default_delivery_days: 3,
            business_suffixes: ["수산", "마트", "식품", "어장", "회사", "상회"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Where and how to fetch directory snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Backend base URL, without trailing slash.
    pub base_url: String,

    /// Path of the fish-type listing endpoint.
    pub fish_types_path: String,

    /// Path of the business listing endpoint.
    pub businesses_path: String,

    /// Page size requested from paginated endpoints.
    pub page_size: u32,

    /// Upper bound on pages followed per listing.
    pub max_pages: u32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            fish_types_path: "/api/fish-types".to_string(),
            businesses_path: "/api/customers".to_string(),
            page_size: 200,
            max_pages: 50,
            timeout_secs: 10,
            api_token: None,
        }
    }
}

impl SusanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SusanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SusanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "extraction": { "default_delivery_days": 1 } }"#;
        let config: SusanConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extraction.default_delivery_days, 1);
        assert_eq!(config.extraction.unit_synonyms.get("킬로").map(String::as_str), Some("kg"));
        assert_eq!(config.directory.page_size, 200);
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SusanConfig::default();
        config.directory.base_url = "https://erp.example.com".to_string();
        config.save(&path).unwrap();

        let loaded = SusanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.directory.base_url, "https://erp.example.com");
        assert_eq!(loaded.extraction.business_suffixes.len(), 6);
    }

    #[test]
    fn test_missing_and_malformed_config_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = SusanConfig::from_file(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(SusanError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(SusanConfig::from_file(&broken), Err(SusanError::Config(_))));
    }
}
