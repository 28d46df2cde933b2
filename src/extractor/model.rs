use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use utoipa::ToSchema;

use crate::fetcher::FetchError;

/// Metadata discovered alongside the article text. Partial metadata is the
/// norm: every field defaults to an empty string when a page gives us nothing
/// to work with. Only `source_domain` and `source_url` are always populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleMetadata {
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub source_domain: String,
    pub source_url: String,
}

impl ArticleMetadata {
    /// Host portion of a URL, used for source-credibility labeling.
    pub fn domain_of(url: &Url) -> String {
        url.host_str().unwrap_or_default().to_string()
    }
}

/// A successful extraction: article text plus whatever metadata was found.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub metadata: ArticleMetadata,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page yielded no plausible article prose. The message is shown to
    /// the caller as-is, so it tells them what to do instead.
    #[error("{0}")]
    InsufficientContent(&'static str),
}

pub const SHELL_PAGE_MSG: &str = "Website returned empty content. This might be a JavaScript-rendered page. Please copy and paste the article text directly.";
pub const NO_CONTAINER_MSG: &str =
    "Could not find article content. Please paste the article text directly.";
pub const TOO_LITTLE_TEXT_MSG: &str = "Could not extract sufficient article text. This might be due to the website's content protection. Please copy and paste the article text directly.";
