// Model inference error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Inference error code constants
///
/// Error code range: 4001-4003
pub struct InferenceErrorCodes;

impl InferenceErrorCodes {
    /// Model handle was never made ready
    pub const MODEL_UNAVAILABLE: i32 = 4001;

    /// Classifier call failed
    pub const CLASSIFICATION_FAILED: i32 = 4002;

    /// Classifier returned an empty prediction list
    pub const NO_PREDICTIONS: i32 = 4003;
}

/// Log an inference error with structured context
pub fn log_inference_error(err: &InferenceError, context: &str) {
    error!(
        "Inference error in {}: code={}, component=ImageDetector, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the external image classifier seam
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// No classifier is loaded
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// Classifier returned an error
    #[error("classification failed: {reason}")]
    ClassificationFailed { reason: String },

    /// Classifier returned no labels
    #[error("classifier returned no predictions")]
    NoPredictions,
}

impl ErrorCode for InferenceError {
    fn code(&self) -> i32 {
        match self {
            InferenceError::ModelUnavailable { .. } => InferenceErrorCodes::MODEL_UNAVAILABLE,
            InferenceError::ClassificationFailed { .. } => {
                InferenceErrorCodes::CLASSIFICATION_FAILED
            }
            InferenceError::NoPredictions => InferenceErrorCodes::NO_PREDICTIONS,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
