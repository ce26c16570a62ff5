// Feature extraction error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Extraction error code constants
///
/// Error code range: 3001-3006
pub struct ExtractionErrorCodes;

impl ExtractionErrorCodes {
    /// Audio clip contained no samples (or too few to frame)
    pub const EMPTY_AUDIO: i32 = 3001;

    /// Sample rate was zero
    pub const INVALID_SAMPLE_RATE: i32 = 3002;

    /// Audio container could not be read
    pub const DECODE: i32 = 3003;

    /// Audio container uses an encoding we do not handle
    pub const UNSUPPORTED_FORMAT: i32 = 3004;

    /// Extracted or supplied features fall outside their declared domain
    pub const INVALID_FEATURES: i32 = 3005;

    /// Extraction parameters cannot be run (zero sizes, hop beyond window)
    pub const INVALID_CONFIG: i32 = 3006;
}

/// Log an extraction error with structured context
///
/// Emits the numeric code, the component and the message on one line so the
/// failure can be correlated with the `error` report returned to the caller.
pub fn log_extraction_error(err: &ExtractionError, context: &str) {
    error!(
        "Extraction error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while turning an audio clip into a feature summary
///
/// None of these ever reach the scorer: the detector maps them to an
/// `error` report before scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// Clip has no samples to analyse
    #[error("audio clip is empty")]
    EmptyAudio,

    /// Sample rate must be positive
    #[error("sample rate must be greater than 0 (got {sample_rate})")]
    InvalidSampleRate { sample_rate: u32 },

    /// Container could not be opened or read
    #[error("could not decode audio: {reason}")]
    Decode { reason: String },

    /// Container is readable but its sample encoding is not supported
    #[error("unsupported audio format: {reason}")]
    UnsupportedFormat { reason: String },

    /// Feature values are non-finite or out of range
    #[error("invalid features: {reason}")]
    InvalidFeatures { reason: String },

    /// Extraction parameters are unusable
    #[error("invalid extraction config: {reason}")]
    InvalidConfig { reason: String },
}

impl ErrorCode for ExtractionError {
    fn code(&self) -> i32 {
        match self {
            ExtractionError::EmptyAudio => ExtractionErrorCodes::EMPTY_AUDIO,
            ExtractionError::InvalidSampleRate { .. } => ExtractionErrorCodes::INVALID_SAMPLE_RATE,
            ExtractionError::Decode { .. } => ExtractionErrorCodes::DECODE,
            ExtractionError::UnsupportedFormat { .. } => ExtractionErrorCodes::UNSUPPORTED_FORMAT,
            ExtractionError::InvalidFeatures { .. } => ExtractionErrorCodes::INVALID_FEATURES,
            ExtractionError::InvalidConfig { .. } => ExtractionErrorCodes::INVALID_CONFIG,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::Decode {
            reason: err.to_string(),
        }
    }
}

impl From<hound::Error> for ExtractionError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::Unsupported => ExtractionError::UnsupportedFormat {
                reason: "unsupported WAV encoding".to_string(),
            },
            hound::Error::IoError(io) => ExtractionError::from(io),
            other => ExtractionError::Decode {
                reason: other.to_string(),
            },
        }
    }
}
