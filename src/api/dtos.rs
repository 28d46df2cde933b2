use serde::Serialize;
use utoipa::ToSchema;

use crate::extractor::ArticleMetadata;

/// Successful verification report. The classifier fields are advisory; the
/// narrative is the primary result.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// "Real" or "Fake", from the local model. For display only.
    pub model_prediction: String,
    /// Probability of the Real class. For display only.
    pub confidence: f64,
    /// Narrative authenticity assessment from the language model.
    pub verification_result: String,
    /// Bounded preview of the text that was actually verified.
    pub extracted_text: String,
    /// Article metadata; all fields empty for non-URL inputs.
    pub metadata: ArticleMetadata,
}
