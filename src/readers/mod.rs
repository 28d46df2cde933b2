//! Document readers: byte payloads in, plain text out.
//!
//! Each reader is independent; the normalizer picks one by declared content
//! type. Readers never return partial success: either usable text comes back
//! or a typed `ReadError` does.

pub mod image;
pub mod pdf;

pub use image::{OcrEngine, OcrHttpClient};

use thiserror::Error;

/// Extracted text below this (trimmed) length is treated as a failed read.
pub const MIN_EXTRACTED_CHARS: usize = 50;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not parse the document: {0}")]
    Parse(String),

    #[error("the text recognition service reported an error: {0}")]
    Ocr(String),

    #[error("could not reach the text recognition service: {0}")]
    Network(String),

    #[error("the document contained no readable text")]
    Empty,
}

/// Shared floor for reader output: trims and rejects results too short to be
/// an article.
pub(crate) fn require_min_text(text: String) -> Result<String, ReadError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(ReadError::Empty);
    }
    Ok(trimmed.to_string())
}
