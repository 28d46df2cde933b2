//! Local heuristic scorer: fixed-vocabulary TF-IDF into a logistic model.
//!
//! The artifacts are produced offline and loaded read-only at startup; the
//! output is advisory only — the narrative verification is the primary
//! result. Scoring mirrors the training stack's conventions: lowercase,
//! two-plus-character word tokens, tf x idf weighting, L2 normalization,
//! label 1 (Real) probability as the confidence.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use utoipa::ToSchema;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Label {
    Real,
    Fake,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Real => write!(f, "Real"),
            Label::Fake => write!(f, "Fake"),
        }
    }
}

/// Advisory output of the local model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the Real class, in [0, 1].
    pub confidence: f64,
}

/// On-disk form of the fitted vectorizer.
#[derive(Debug, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
}

/// On-disk form of the fitted linear model.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("artifact dimensions disagree: {0}")]
    Shape(String),
}

/// The loaded vectorizer/model pair. Immutable after construction; safe to
/// share across request tasks behind an `Arc`.
#[derive(Debug)]
pub struct Classifier {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl Classifier {
    /// Load both artifacts from a directory at startup.
    pub fn load(model_dir: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let dir = model_dir.as_ref();
        let vectorizer: VectorizerArtifact = read_artifact(&dir.join(VECTORIZER_FILE))?;
        let model: ModelArtifact = read_artifact(&dir.join(CLASSIFIER_FILE))?;
        Self::from_artifacts(vectorizer, model)
    }

    pub fn from_artifacts(
        vectorizer: VectorizerArtifact,
        model: ModelArtifact,
    ) -> Result<Self, ClassifierError> {
        let dims = vectorizer.vocabulary.len();
        if vectorizer.idf.len() != dims {
            return Err(ClassifierError::Shape(format!(
                "vocabulary has {} terms but idf has {} entries",
                dims,
                vectorizer.idf.len()
            )));
        }
        if model.coefficients.len() != dims {
            return Err(ClassifierError::Shape(format!(
                "vocabulary has {} terms but model has {} coefficients",
                dims,
                model.coefficients.len()
            )));
        }
        if let Some(&index) = vectorizer.vocabulary.values().max() {
            if index >= dims {
                return Err(ClassifierError::Shape(format!(
                    "vocabulary index {index} out of range for {dims} dimensions"
                )));
            }
        }
        Ok(Self {
            vocabulary: vectorizer.vocabulary,
            idf: vectorizer.idf,
            coefficients: model.coefficients,
            intercept: model.intercept,
        })
    }

    /// Score a document. Never fails: text with no in-vocabulary tokens
    /// scores at the model's intercept.
    pub fn score(&self, text: &str) -> Prediction {
        let lowered = text.to_lowercase();
        let mut tf: HashMap<usize, f64> = HashMap::new();
        for token in TOKEN_REGEX.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                *tf.entry(index).or_insert(0.0) += 1.0;
            }
        }

        // tf x idf, then L2 normalization.
        let mut weighted: Vec<(usize, f64)> = tf
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        let norm: f64 = weighted.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in weighted.iter_mut() {
                *v /= norm;
            }
        }

        let z: f64 = self.intercept
            + weighted
                .iter()
                .map(|(index, v)| v * self.coefficients[*index])
                .sum::<f64>();
        let p_real = sigmoid(z);

        Prediction {
            label: if p_real >= 0.5 { Label::Real } else { Label::Fake },
            confidence: p_real,
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ClassifierError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ClassifierError::Json {
        path: display,
        source,
    })
}
