//! Request-level error taxonomy.
//!
//! Every variant is recoverable from the caller's perspective: 400 for
//! conditions the caller can fix, 500 for upstream or unexpected failures.
//! Nothing here aborts the process.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::extractor::ExtractError;
use crate::readers::ReadError;
use crate::verifier::LlmError;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Error accessing the URL: {0}")]
    Network(String),

    #[error("{0}")]
    InsufficientContent(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Uploaded file is too large ({0} bytes)")]
    OversizeInput(u64),

    #[error("Error in text recognition: {0}")]
    Ocr(String),

    #[error("Could not read the uploaded document: {0}")]
    Parse(String),

    #[error("Provide exactly one of: file, url, or text")]
    AmbiguousOrMissingInput,

    #[error("Error in verification process: {0}")]
    Upstream(String),
}

impl VerifyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Network(_)
            | Self::InsufficientContent(_)
            | Self::UnsupportedType(_)
            | Self::OversizeInput(_)
            | Self::Parse(_)
            | Self::AmbiguousOrMissingInput => StatusCode::BAD_REQUEST,
            Self::Ocr(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExtractError> for VerifyError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Fetch(e) => Self::Network(e.to_string()),
            ExtractError::InsufficientContent(msg) => Self::InsufficientContent(msg.to_string()),
        }
    }
}

impl From<ReadError> for VerifyError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Parse(msg) => Self::Parse(msg),
            ReadError::Ocr(msg) => Self::Ocr(msg),
            // The OCR service being unreachable is our dependency problem,
            // not the caller's.
            ReadError::Network(msg) => Self::Upstream(msg),
            ReadError::Empty => {
                Self::InsufficientContent("Could not extract sufficient text from the input".into())
            }
        }
    }
}

impl From<LlmError> for VerifyError {
    fn from(err: LlmError) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Client-facing error envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
