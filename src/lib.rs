// Audio Verdict - heuristic audio authenticity scoring
// Clip-level feature extraction, a pure threshold scorer and JSON reports

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod inference;
pub mod report;

// Re-exports for convenience
pub use analysis::{
    AudioDetector, AudioVerdict, FeatureExtractor, FeatureSummary, HeuristicAudioScorer,
    ScoreResult,
};
pub use config::{AppConfig, ExtractionConfig};
pub use inference::{ImageClassifier, ImageDetector, ModelHandle, Prediction};
pub use report::{DetectionReport, MediaKind, Outcome};
