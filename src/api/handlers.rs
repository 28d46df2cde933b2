use axum::{Json, extract::Multipart, extract::State};
use bytes::Bytes;
use tracing::{info, instrument};

use crate::api::dtos::VerifyResponse;
use crate::app_state::AppState;
use crate::error::VerifyError;
use crate::normalizer::{self, VerificationInput};

/// Verify a news article supplied as exactly one of: an uploaded file (PDF
/// or image), a URL, or raw text.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "verify",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Verification report", body = VerifyResponse),
        (status = 400, description = "Invalid or insufficient input"),
        (status = 500, description = "Upstream service failure")
    )
)]
#[instrument(skip_all)]
pub async fn verify(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VerifyResponse>, VerifyError> {
    let mut file: Option<(Bytes, String)> = None;
    let mut url: Option<String> = None;
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VerifyError::Parse(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| VerifyError::Parse(e.to_string()))?;
                file = Some((bytes, content_type));
            }
            Some("url") => {
                url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| VerifyError::Parse(e.to_string()))?,
                );
            }
            Some("text") => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| VerifyError::Parse(e.to_string()))?,
                );
            }
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    let input = VerificationInput::from_channels(file, url, text)?;
    let normalized = normalizer::normalize(input, state.ocr.as_ref()).await?;

    // Advisory local score; cheap, runs before the slow narrative call.
    let prediction = state.classifier.score(&normalized.text);

    let narrative = state
        .verifier
        .verify(&normalized.text, normalized.metadata.as_ref())
        .await?;

    info!(
        label = %prediction.label,
        confidence = prediction.confidence,
        chars = normalized.text.len(),
        "verification complete"
    );

    Ok(Json(VerifyResponse {
        model_prediction: prediction.label.to_string(),
        confidence: prediction.confidence,
        verification_result: narrative,
        extracted_text: normalizer::preview(&normalized.text),
        metadata: normalized.metadata.unwrap_or_default(),
    }))
}
