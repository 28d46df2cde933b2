//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so the service starts without any configuration in place. `Config::from_env`
//! performs the loading; validation hooks can grow into returning
//! `ConfigError` later.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and deployment
/// tooling refer to them directly.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MODEL_DIR: &str = "MODEL_DIR";
pub const ENV_OCR_BASE_URL: &str = "OCR_BASE_URL";
pub const ENV_OCR_API_KEY: &str = "OCR_API_KEY";
pub const ENV_LLM_BASE_URL: &str = "LLM_BASE_URL";
pub const ENV_LLM_API_KEY: &str = "LLM_API_KEY";
pub const ENV_LLM_MODEL: &str = "LLM_MODEL";
pub const ENV_SEARCH_BASE_URL: &str = "NEWS_SEARCH_BASE_URL";
pub const ENV_SEARCH_API_KEY: &str = "NEWS_SEARCH_API_KEY";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MODEL_DIR: &str = "model";
const DEFAULT_OCR_BASE_URL: &str = "https://api.ocr.space/parse/image";
const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_LLM_MODEL: &str = "gemini-1.5-pro-latest";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    model_dir: String,
    ocr_base_url: String,
    ocr_api_key: String,
    llm_base_url: String,
    llm_api_key: String,
    llm_model: String,
    search_base_url: Option<String>,
    search_api_key: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    ///
    /// The API keys default to empty strings; the upstream services reject
    /// such requests, which is the correct failure mode for a misconfigured
    /// deployment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let model_dir = env::var(ENV_MODEL_DIR).unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string());
        let ocr_base_url =
            env::var(ENV_OCR_BASE_URL).unwrap_or_else(|_| DEFAULT_OCR_BASE_URL.to_string());
        let ocr_api_key = env::var(ENV_OCR_API_KEY).unwrap_or_default();
        let llm_base_url =
            env::var(ENV_LLM_BASE_URL).unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());
        let llm_api_key = env::var(ENV_LLM_API_KEY).unwrap_or_default();
        let llm_model = env::var(ENV_LLM_MODEL).unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());
        // Cross-reference search is optional; when unset the verification
        // prompt simply carries no related-article hits.
        let search_base_url = env::var(ENV_SEARCH_BASE_URL).ok().filter(|s| !s.is_empty());
        let search_api_key = env::var(ENV_SEARCH_API_KEY).ok().filter(|s| !s.is_empty());
        Ok(Self {
            bind_addr,
            model_dir,
            ocr_base_url,
            ocr_api_key,
            llm_base_url,
            llm_api_key,
            llm_model,
            search_base_url,
            search_api_key,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Directory holding `vectorizer.json` and `classifier.json`.
    pub fn model_dir(&self) -> &str {
        &self.model_dir
    }
    /// OCR service endpoint.
    pub fn ocr_base_url(&self) -> &str {
        &self.ocr_base_url
    }
    /// OCR service API key.
    pub fn ocr_api_key(&self) -> &str {
        &self.ocr_api_key
    }
    /// Generative language API base URL.
    pub fn llm_base_url(&self) -> &str {
        &self.llm_base_url
    }
    /// Generative language API key.
    pub fn llm_api_key(&self) -> &str {
        &self.llm_api_key
    }
    /// Model name passed to the generative language API.
    pub fn llm_model(&self) -> &str {
        &self.llm_model
    }
    /// Optional news-search endpoint for cross-reference snippets.
    pub fn search_base_url(&self) -> Option<&str> {
        self.search_base_url.as_deref()
    }
    /// API key for the news-search endpoint.
    pub fn search_api_key(&self) -> Option<&str> {
        self.search_api_key.as_deref()
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Reserved for future validation failures.
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
