//! Data source client for the spreadsheet JSON API
//!
//! The upstream (a SheetDB-style endpoint) exposes two read-only queries:
//! `GET <base>` returns every row, `GET <base>/search?id=<v>` returns the
//! rows whose id column equals `<v>`.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::content::Post;

/// Errors from the data source, kept apart so pages can log the cause
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to data source failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("data source returned status {0}")]
    Status(StatusCode),
}

/// Read-only client for the post spreadsheet
#[derive(Clone)]
pub struct PostSource {
    client: reqwest::Client,
    base_url: String,
}

impl PostSource {
    /// Create a client for the given endpoint
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every post, in spreadsheet order
    pub async fn fetch_all(&self) -> Result<Vec<Post>, SourceError> {
        self.get(&self.base_url, &[]).await
    }

    /// Fetch the posts whose id equals `id` (typically zero or one row)
    pub async fn search_by_id(&self, id: &str) -> Result<Vec<Post>, SourceError> {
        let url = format!("{}/search", self.base_url);
        self.get(&url, &[("id", id)]).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<Post>, SourceError> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}
