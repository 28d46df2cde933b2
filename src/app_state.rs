use std::sync::Arc;

use crate::classifier::{Classifier, ClassifierError};
use crate::config::Config;
use crate::readers::{OcrEngine, OcrHttpClient};
use crate::verifier::{GenerativeHttpClient, NewsSearch, NewsSearchHttpClient, Verifier};

/// Process-wide context: built once at startup, read-only for the process
/// lifetime, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub ocr: Arc<dyn OcrEngine>,
    pub verifier: Arc<Verifier>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ClassifierError> {
        let classifier = Arc::new(Classifier::load(config.model_dir())?);
        let ocr: Arc<dyn OcrEngine> = Arc::new(OcrHttpClient::new(
            config.ocr_base_url(),
            config.ocr_api_key(),
        ));
        let model = Arc::new(GenerativeHttpClient::new(
            config.llm_base_url(),
            config.llm_api_key(),
            config.llm_model(),
        ));
        let search: Option<Arc<dyn NewsSearch>> =
            match (config.search_base_url(), config.search_api_key()) {
                (Some(base), Some(key)) => Some(Arc::new(NewsSearchHttpClient::new(base, key))),
                _ => None,
            };
        Ok(Self {
            classifier,
            ocr,
            verifier: Arc::new(Verifier::new(model, search)),
        })
    }
}
