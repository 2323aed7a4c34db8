//! HTTP client for the backend's listing endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::DirectorySource;
use crate::error::DirectoryError;
use crate::models::config::DirectoryConfig;
use crate::models::directory::{Business, FishType, ListResponse};

/// Directory client for the order backend's REST API.
pub struct HttpDirectory {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl HttpDirectory {
    /// Create a client for the configured backend.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: DirectoryConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    /// Fetch every page of a listing endpoint.
    pub async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, DirectoryError> {
        let url = format!("{}{}", self.config.base_url, path);
        let max_pages = self.config.max_pages.max(1);
        let mut entries = Vec::new();
        let mut truncated = false;

        for page in 0..max_pages {
            debug!(url = %url, page, "fetching directory page");

            let mut request = self
                .client
                .get(&url)
                .query(&[("page", page), ("size", self.config.page_size)]);
            if let Some(token) = &self.config.api_token {
                request = request.bearer_auth(token);
            }

            let resp = request.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(DirectoryError::Server {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = resp.bytes().await?;
            let listing: ListResponse<T> = serde_json::from_slice(&body)?;
            let (items, has_more) = listing.into_page(page);
            entries.extend(items);

            if !has_more {
                break;
            }
            truncated = page + 1 == max_pages;
        }

        if truncated {
            warn!(url = %url, max_pages, count = entries.len(), "page limit reached; listing truncated");
        }

        info!(url = %url, count = entries.len(), "fetched directory listing");
        Ok(entries)
    }
}

impl DirectorySource for HttpDirectory {
    async fn fetch_fish_types(&self) -> Result<Vec<FishType>, DirectoryError> {
        self.fetch_list(&self.config.fish_types_path).await
    }

    async fn fetch_businesses(&self) -> Result<Vec<Business>, DirectoryError> {
        self.fetch_list(&self.config.businesses_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let config = DirectoryConfig {
            base_url: "http://erp.local/".to_string(),
            ..DirectoryConfig::default()
        };
        let directory = HttpDirectory::new(config).unwrap();
        assert_eq!(directory.config.base_url, "http://erp.local");
    }

    /// Serve the same JSON body to every request until the test ends.
    async fn serve(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_paging_stops_at_page_limit() {
        let base_url = serve(r#"{"content": [{"id": 1, "name": "고등어"}], "last": false}"#).await;
        let config = DirectoryConfig {
            base_url,
            max_pages: 3,
            ..DirectoryConfig::default()
        };

        let fish: Vec<FishType> = HttpDirectory::new(config)
            .unwrap()
            .fetch_list("/api/fish-types")
            .await
            .unwrap();
        assert_eq!(fish.len(), 3);
    }

    #[tokio::test]
    async fn test_last_page_ends_listing() {
        let base_url = serve(r#"[{"id": 7, "companyName": "동해수산"}]"#).await;
        let config = DirectoryConfig {
            base_url,
            ..DirectoryConfig::default()
        };

        let businesses = HttpDirectory::new(config).unwrap().fetch_businesses().await.unwrap();
        assert_eq!(businesses, vec![Business::new(7, "동해수산")]);
    }
}
