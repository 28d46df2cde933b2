//! OCR over HTTP: image bytes in, recognized English text out.
//!
//! The remote service takes a base64 data-URI form payload and answers with
//! per-region parsed text plus an exit code; anything other than a success
//! code is surfaced as `ReadError::Ocr`.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::readers::{ReadError, require_min_text};

/// Seam for the image channel, mockable in tests.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn image_to_text(&self, image_bytes: &[u8], mime: &str) -> Result<String, ReadError>;
}

static OCR_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build OCR HTTP client")
});

/// Client for an OCR.space-style parse endpoint.
pub struct OcrHttpClient {
    base_url: String,
    api_key: String,
}

impl OcrHttpClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(rename = "OCRExitCode", default)]
    exit_code: i32,
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored: bool,
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,
}

// Exit codes 1 and 2 mean full and partial success respectively.
const MAX_SUCCESS_EXIT_CODE: i32 = 2;

#[async_trait]
impl OcrEngine for OcrHttpClient {
    #[instrument(skip_all, fields(bytes = image_bytes.len(), mime))]
    async fn image_to_text(&self, image_bytes: &[u8], mime: &str) -> Result<String, ReadError> {
        let data_uri = format!("data:{};base64,{}", mime, BASE64.encode(image_bytes));

        let form = [
            ("apikey", self.api_key.as_str()),
            ("language", "eng"),
            ("detectOrientation", "true"),
            ("scale", "true"),
            ("base64Image", &data_uri),
        ];

        let response = OCR_CLIENT
            .post(&self.base_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ReadError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ReadError::Ocr(format!(
                "service answered with status {}",
                response.status()
            )));
        }

        let body: OcrResponse = response
            .json()
            .await
            .map_err(|e| ReadError::Ocr(format!("unreadable response: {e}")))?;

        if body.is_errored || body.exit_code > MAX_SUCCESS_EXIT_CODE || body.exit_code < 1 {
            let detail = body
                .error_message
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("exit code {}", body.exit_code));
            return Err(ReadError::Ocr(detail));
        }

        let text = body
            .parsed_results
            .into_iter()
            .map(|r| r.parsed_text)
            .collect::<Vec<_>>()
            .join("\n");

        require_min_text(text)
    }
}
