//! Optional cross-reference search: a handful of related-article hits to
//! ground the verification prompt. Best-effort by design; callers degrade to
//! an empty hit list on any failure.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

pub const MAX_HITS: usize = 5;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("could not reach the news search service: {0}")]
    Network(String),

    #[error("the news search service answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("unreadable news search response: {0}")]
    Malformed(String),
}

/// One related article found for the claim being verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub source: String,
    pub url: String,
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn related(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

static SEARCH_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build search HTTP client")
});

/// Client for a JSON news-search endpoint (GNews-style `articles` payload).
pub struct NewsSearchHttpClient {
    base_url: String,
    api_key: String,
}

impl NewsSearchHttpClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    source: ArticleSource,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: String,
}

#[async_trait]
impl NewsSearch for NewsSearchHttpClient {
    #[instrument(skip_all, fields(query = %query))]
    async fn related(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let response = SEARCH_CLIENT
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("apikey", self.api_key.as_str()),
                ("max", &MAX_HITS.to_string()),
                ("lang", "en"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;

        Ok(parsed
            .articles
            .into_iter()
            .take(MAX_HITS)
            .filter(|a| !a.title.is_empty())
            .map(|a| SearchHit {
                title: a.title,
                source: a.source.name,
                url: a.url,
            })
            .collect())
    }
}
