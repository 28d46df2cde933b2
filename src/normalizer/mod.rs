//! Input normalization: four heterogeneous input modes, one downstream text
//! contract.
//!
//! The normalizer picks the right reader by channel and declared content
//! type, enforces the universal minimum-length gate, and bounds what the
//! client gets echoed back.

use bytes::Bytes;
use tokio::task;
use tracing::instrument;

use crate::error::VerifyError;
use crate::extractor::{self, ArticleMetadata};
use crate::readers::{OcrEngine, pdf};

/// Inputs whose trimmed text is shorter than this are rejected on every
/// channel.
pub const MIN_TEXT_CHARS: usize = 50;
/// Uploads above this size are rejected before any extraction is attempted.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// The response echoes at most this many characters of extracted text.
pub const PREVIEW_CHARS: usize = 500;

/// Exactly one input channel, validated at construction.
#[derive(Debug)]
pub enum VerificationInput {
    Upload { bytes: Bytes, content_type: String },
    Url(String),
    RawText(String),
}

impl VerificationInput {
    /// Enforce the one-channel policy: zero or multiple populated channels
    /// are rejected outright rather than silently prioritized.
    pub fn from_channels(
        file: Option<(Bytes, String)>,
        url: Option<String>,
        text: Option<String>,
    ) -> Result<Self, VerifyError> {
        let url = url.filter(|u| !u.trim().is_empty());
        let text = text.filter(|t| !t.trim().is_empty());

        match (file, url, text) {
            (Some((bytes, content_type)), None, None) => Ok(Self::Upload { bytes, content_type }),
            (None, Some(url), None) => Ok(Self::Url(url)),
            (None, None, Some(text)) => Ok(Self::RawText(text)),
            _ => Err(VerifyError::AmbiguousOrMissingInput),
        }
    }
}

/// The unified downstream contract: plain text plus metadata when the source
/// was a web page.
#[derive(Debug)]
pub struct NormalizedInput {
    pub text: String,
    pub metadata: Option<ArticleMetadata>,
}

/// Dispatch to the matching reader and apply the universal gates.
#[instrument(skip_all)]
pub async fn normalize(
    input: VerificationInput,
    ocr: &dyn OcrEngine,
) -> Result<NormalizedInput, VerifyError> {
    let (text, metadata) = match input {
        VerificationInput::Upload { bytes, content_type } => {
            if bytes.len() > MAX_UPLOAD_BYTES {
                return Err(VerifyError::OversizeInput(bytes.len() as u64));
            }
            let text = if content_type == "application/pdf" {
                // PDF parsing is CPU-bound; keep it off the async workers.
                task::spawn_blocking(move || pdf::read_pdf(&bytes))
                    .await
                    .map_err(|e| VerifyError::Upstream(e.to_string()))??
            } else if content_type.starts_with("image/") {
                ocr.image_to_text(&bytes, &content_type).await?
            } else {
                return Err(VerifyError::UnsupportedType(content_type));
            };
            (text, None)
        }
        VerificationInput::Url(url) => {
            let extraction = extractor::extract_from_url(&url).await?;
            (extraction.text, Some(extraction.metadata))
        }
        VerificationInput::RawText(text) => (text, None),
    };

    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(VerifyError::InsufficientContent(
            "Could not extract sufficient text from the input".to_string(),
        ));
    }

    Ok(NormalizedInput { text, metadata })
}

/// Bounded echo of the extracted text: identity up to the preview length,
/// else the head plus an ellipsis marker.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
