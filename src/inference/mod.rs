// Inference module - model-backed image authenticity detection
//
// The classifier itself lives outside this crate. Callers construct it once
// and hand it to ImageDetector wrapped in a ModelHandle; a model that failed
// to load is the Unavailable variant

use serde::{Deserialize, Serialize};

use crate::error::{log_inference_error, InferenceError};
use crate::report::{DetectionReport, MediaKind, Outcome};

/// A loaded model, or the reason it is not available
#[derive(Debug, Clone, PartialEq)]
pub enum ModelHandle<T> {
    Unavailable { reason: String },
    Ready(T),
}

impl<T> ModelHandle<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelHandle::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelHandle::Ready(_))
    }

    /// Borrow the model, or fail with `ModelUnavailable`
    pub fn get(&self) -> Result<&T, InferenceError> {
        match self {
            ModelHandle::Ready(model) => Ok(model),
            ModelHandle::Unavailable { reason } => Err(InferenceError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}

/// One label/score pair returned by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Labels such as `fake` or `Deepfake` mark manipulated content
    pub fn is_fake(&self) -> bool {
        self.label.to_lowercase().contains("fake")
    }
}

/// Trait implemented by external image classifiers
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, InferenceError>;
}

/// Turns classifier output into a detection report
pub struct ImageDetector<C> {
    model: ModelHandle<C>,
}

impl<C: ImageClassifier> ImageDetector<C> {
    pub fn new(model: ModelHandle<C>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelHandle<C> {
        &self.model
    }

    /// Classify an encoded image
    ///
    /// Failures come back as error reports
    pub fn detect(&self, image: &[u8]) -> DetectionReport {
        match self.top_prediction(image) {
            Ok(top) => render(&top),
            Err(err) => {
                log_inference_error(&err, "detect");
                DetectionReport::error(MediaKind::Image, err)
            }
        }
    }

    fn top_prediction(&self, image: &[u8]) -> Result<Prediction, InferenceError> {
        let predictions = self.model.get()?.classify(image)?;
        tracing::debug!(
            "[ImageDetector] {} prediction(s) for {} bytes",
            predictions.len(),
            image.len()
        );
        predictions
            .into_iter()
            .reduce(|best, next| if next.score > best.score { next } else { best })
            .ok_or(InferenceError::NoPredictions)
    }
}

fn render(top: &Prediction) -> DetectionReport {
    let percent = top.score * 100.0;
    let (result, explanation) = if top.is_fake() {
        (
            Outcome::Deepfake,
            format!(
                "Model detected deepfake characteristics with {percent:.1}% confidence. Label: {}",
                top.label
            ),
        )
    } else {
        (
            Outcome::Real,
            format!(
                "Model classified as authentic with {percent:.1}% confidence. Label: {}",
                top.label
            ),
        )
    };

    DetectionReport {
        kind: MediaKind::Image,
        result,
        confidence: top.score,
        explanation,
    }
}
