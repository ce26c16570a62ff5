// Analysis module - clip-level audio authenticity detection
//
// Pipeline: decode (audio::wav) → FeatureExtractor → HeuristicAudioScorer
// → DetectionReport. Decoding and extraction failures stop before the
// scorer and come back as error reports.

use std::path::Path;

pub mod features;
pub mod scorer;

pub use features::{FeatureExtractor, FeatureSummary};
pub use scorer::{AudioVerdict, HeuristicAudioScorer, Indicators, ScoreResult, SubScores};

use crate::audio::read_wav;
use crate::config::ExtractionConfig;
use crate::error::{log_extraction_error, ExtractionError};
use crate::report::{DetectionReport, MediaKind};

/// End-to-end audio detector
///
/// Holds no per-clip state; a `FeatureExtractor` is planned for each clip's
/// sample rate.
#[derive(Debug, Clone, Default)]
pub struct AudioDetector {
    scorer: HeuristicAudioScorer,
    config: ExtractionConfig,
}

impl AudioDetector {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            scorer: HeuristicAudioScorer::new(),
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the clip summary without scoring it
    pub fn extract(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<FeatureSummary, ExtractionError> {
        FeatureExtractor::new(sample_rate, &self.config)?.extract(samples)
    }

    /// Score a decoded mono clip
    pub fn detect_samples(&self, samples: &[f32], sample_rate: u32) -> DetectionReport {
        match self.extract(samples, sample_rate) {
            Ok(summary) => self.score(&summary),
            Err(err) => Self::failure(&err, "detect_samples"),
        }
    }

    /// Decode and score a WAV file
    pub fn detect_wav(&self, path: &Path) -> DetectionReport {
        tracing::info!("[AudioDetector] Analyzing {}", path.display());
        let audio = match read_wav(path) {
            Ok(audio) => audio,
            Err(err) => return Self::failure(&err, "detect_wav"),
        };
        self.detect_samples(&audio.samples, audio.sample_rate)
    }

    /// Score a summary produced elsewhere
    ///
    /// The summary is validated first; out-of-domain values yield an error
    /// report instead of a verdict.
    pub fn detect_features(&self, summary: &FeatureSummary) -> DetectionReport {
        if let Err(err) = summary.validate() {
            return Self::failure(&err, "detect_features");
        }
        self.score(summary)
    }

    fn score(&self, summary: &FeatureSummary) -> DetectionReport {
        let result = self.scorer.score(summary);
        tracing::info!(
            "[AudioDetector] verdict={} confidence={:.3}",
            result.verdict,
            result.confidence
        );
        DetectionReport::from_score(&result)
    }

    fn failure(err: &ExtractionError, context: &str) -> DetectionReport {
        log_extraction_error(err, context);
        DetectionReport::error(MediaKind::Audio, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Outcome;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn sine(sample_rate: u32, frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_detect_features_scores_valid_summary() {
        let detector = AudioDetector::default();
        let report = detector.detect_features(&FeatureSummary::new(30.0, 4000.0, 0.2));

        assert_eq!(report.kind, MediaKind::Audio);
        assert_eq!(report.result, Outcome::Synthetic);
        assert!((report.confidence - (0.3 + 0.4 + 0.4) / 3.0).abs() < 1e-12);
        assert_eq!(
            report.explanation,
            "Audio features suggest synthetic origin. MFCC variance: 30.0, Spectral centroid: 4000.0Hz, ZCR: 0.200"
        );
    }

    #[test]
    fn test_detect_features_rejects_invalid_summary() {
        let detector = AudioDetector::default();
        let report = detector.detect_features(&FeatureSummary::new(f64::NAN, 2000.0, 0.05));

        assert!(report.is_error());
        assert_eq!(report.confidence, 0.0);
        assert!(report.explanation.starts_with("Error processing audio: "));
    }

    #[test]
    fn test_detect_samples_empty_clip() {
        let report = AudioDetector::default().detect_samples(&[], 16_000);
        assert!(report.is_error());
        assert_eq!(
            report.explanation,
            format!("Error processing audio: {}", ExtractionError::EmptyAudio)
        );
    }

    #[test]
    fn test_detect_samples_zero_sample_rate() {
        let report = AudioDetector::default().detect_samples(&[0.1, 0.2], 0);
        assert!(report.is_error());
    }

    #[test]
    fn test_mid_band_tone_is_human() {
        // 1.5 kHz tone: centroid and ZCR both inside their typical bands
        let sample_rate = 48_000;
        let clip = sine(sample_rate, 1500.0, 48_000);
        let report = AudioDetector::default().detect_samples(&clip, sample_rate);
        assert_eq!(report.result, Outcome::Human, "{}", report.explanation);
    }

    #[test]
    fn test_white_noise_is_synthetic() {
        let mut rng = StdRng::seed_from_u64(42);
        let noise: Vec<f32> = (0..48_000).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let report = AudioDetector::default().detect_samples(&noise, 48_000);
        assert_eq!(report.result, Outcome::Synthetic, "{}", report.explanation);
    }

    #[test]
    fn test_detect_wav_missing_file() {
        let report = AudioDetector::default().detect_wav(Path::new("/nonexistent/clip.wav"));
        assert!(report.is_error());
        assert!(report.explanation.contains("clip.wav"));
    }
}
