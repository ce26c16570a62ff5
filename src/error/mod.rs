// Error types for the audio verdict pipeline
//
// This module defines the error types for feature extraction and model
// inference, with numeric error codes suitable for JSON reports and logs.

mod extraction;
mod inference;

pub use extraction::{log_extraction_error, ExtractionError, ExtractionErrorCodes};
pub use inference::{log_inference_error, InferenceError, InferenceErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so every failure surfaced in a report or a
/// log line carries the same shape.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
