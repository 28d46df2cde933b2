//! Narrative verification: compose the prompt, consult the language model,
//! append the standing disclaimer.

pub mod credibility;
pub mod llm;
pub mod prompt;
pub mod search;

pub use llm::{GenerativeHttpClient, LlmError, NarrativeModel};
pub use search::{NewsSearch, NewsSearchHttpClient, SearchHit};

use chrono::Utc;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::extractor::ArticleMetadata;

const DISCLAIMER: &str = "\n\nVERIFICATION PROCESS: This analysis was conducted using advanced AI cross-referencing against official sources, major news outlets, and verified databases. For critical information, always verify with official sources.";

/// Words of article text used as the search query when no title is known.
const QUERY_WORDS: usize = 10;

pub struct Verifier {
    model: Arc<dyn NarrativeModel>,
    search: Option<Arc<dyn NewsSearch>>,
}

impl Verifier {
    pub fn new(model: Arc<dyn NarrativeModel>, search: Option<Arc<dyn NewsSearch>>) -> Self {
        Self { model, search }
    }

    /// Produce the verification narrative for extracted article text.
    ///
    /// Search is best-effort: a failed lookup costs the prompt its
    /// cross-reference hits, never the whole verification.
    #[instrument(skip_all, fields(chars = text.len(), has_metadata = metadata.is_some()))]
    pub async fn verify(
        &self,
        text: &str,
        metadata: Option<&ArticleMetadata>,
    ) -> Result<String, LlmError> {
        let hits = match &self.search {
            Some(search) => match search.related(&search_query(text, metadata)).await {
                Ok(hits) => hits,
                Err(err) => {
                    warn!(error = %err, "cross-reference search failed; continuing without hits");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let prompt = prompt::compose(text, metadata, &hits, Utc::now().date_naive());
        let narrative = self.model.generate(&prompt).await?;
        Ok(format!("{narrative}{DISCLAIMER}"))
    }
}

fn search_query(text: &str, metadata: Option<&ArticleMetadata>) -> String {
    if let Some(meta) = metadata {
        if !meta.title.is_empty() {
            return meta.title.clone();
        }
    }
    text.split_whitespace()
        .take(QUERY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}
