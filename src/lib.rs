//! News verification backend.
//!
//! Accepts a news article as raw text, a URL, an uploaded image, or a PDF;
//! normalizes all four input modes into one plain-text contract; scores it
//! with a locally loaded classifier; and asks a hosted language model for a
//! narrative authenticity assessment.

pub mod api;
pub mod app_state;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod normalizer;
pub mod readers;
pub mod verifier;
