pub mod cleaner;
pub mod content;
pub mod metadata;
pub mod model;

#[cfg(test)]
mod tests;

pub use model::{ArticleMetadata, ExtractError, Extraction};

use scraper::Html;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::fetcher;

/// Bodies under this size are almost always JavaScript-rendered shells.
const MIN_BODY_BYTES: usize = 500;
/// Extracted prose shorter than this is not a usable article.
const MIN_TEXT_CHARS: usize = 100;
/// Real article prose carries at least a few sentence terminators.
const MIN_SENTENCE_MARKS: usize = 3;

/// Fetch a news page and extract its text and metadata.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract_from_url(url: &str) -> Result<Extraction, ExtractError> {
    let resp = fetcher::fetch(url).await.inspect_err(|err| {
        warn!(error = %err, transient = err.is_transient(), "page fetch failed");
    })?;
    extract(&resp.body_utf8, &resp.url_final)
}

/// Extract article text and metadata from already-fetched HTML.
///
/// Metadata runs against the raw document (meta tags live in stripped
/// regions); content selection runs against the noise-stripped document.
pub fn extract(html: &str, url: &Url) -> Result<Extraction, ExtractError> {
    if html.len() < MIN_BODY_BYTES {
        return Err(ExtractError::InsufficientContent(model::SHELL_PAGE_MSG));
    }

    let doc = Html::parse_document(html);
    let metadata = metadata::extract_metadata(&doc, url);

    let cleaned = cleaner::strip_noise(html);
    let content_doc = Html::parse_document(&cleaned);
    let (strategy, container) = content::select_container(&content_doc)
        .ok_or(ExtractError::InsufficientContent(model::NO_CONTAINER_MSG))?;
    let text = content::collect_text(container);

    if text.chars().count() < MIN_TEXT_CHARS || text.matches('.').count() < MIN_SENTENCE_MARKS {
        return Err(ExtractError::InsufficientContent(model::TOO_LITTLE_TEXT_MSG));
    }

    debug!(strategy, chars = text.len(), "article content extracted");
    Ok(Extraction { metadata, text })
}
