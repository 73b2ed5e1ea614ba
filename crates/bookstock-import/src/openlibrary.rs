//! Open Library search API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ImportError, ImportResult};
use crate::importer::{Candidate, CatalogImporter};

pub const SOURCE_NAME: &str = "Open Library";
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_QUERY: &str = "best sellers";

/// Open Library API client.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: Client,
    base_url: String,
    query: String,
}

/// Body of a `/search.json` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Option<Vec<SearchDoc>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub first_publish_year: Option<i32>,
}

impl SearchResponse {
    /// Keep the complete records, using each document's first listed
    /// author.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.docs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|doc| {
                let author = doc.author_name.and_then(|names| names.into_iter().next());
                Candidate::from_parts(doc.title, author, doc.first_publish_year)
            })
            .collect()
    }
}

/// Parse a raw `/search.json` body.
///
/// # Errors
/// Returns [`ImportError::Parse`] if the body is not a valid search response.
pub fn parse_search_response(body: &str) -> ImportResult<SearchResponse> {
    serde_json::from_str(body).map_err(|e| ImportError::Parse {
        source_name: SOURCE_NAME.to_string(),
        message: e.to_string(),
    })
}

impl OpenLibraryClient {
    /// Create a new Open Library client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        query: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("bookstock/0.1.0 (https://github.com/oxur/bookstock)")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            query: query.into(),
        })
    }

    /// Run one search request.
    ///
    /// # Errors
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be parsed.
    pub async fn search(&self, limit: usize) -> ImportResult<SearchResponse> {
        let url = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", self.query.as_str()),
                ("limit", limit.as_str()),
                ("offset", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Http {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

#[async_trait]
impl CatalogImporter for OpenLibraryClient {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_candidates(&self, limit: usize) -> ImportResult<Vec<Candidate>> {
        let response = self.search(limit).await?;
        if response.docs.is_none() {
            log::info!("{} returned no results", SOURCE_NAME);
        }
        let mut candidates = response.into_candidates();
        candidates.truncate(limit);
        Ok(candidates)
    }
}
