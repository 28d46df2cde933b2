use tracing::instrument;

use crate::readers::{ReadError, require_min_text};

/// Extract text from an in-memory PDF, pages in order.
///
/// `pdf_extract` already separates pages with newlines; we only enforce the
/// minimum-text floor on the concatenated result. CPU-bound: call sites run
/// this under `spawn_blocking`.
#[instrument(skip_all, fields(bytes = pdf_bytes.len()))]
pub fn read_pdf(pdf_bytes: &[u8]) -> Result<String, ReadError> {
    let text =
        pdf_extract::extract_text_from_mem(pdf_bytes).map_err(|e| ReadError::Parse(e.to_string()))?;
    require_min_text(text)
}
