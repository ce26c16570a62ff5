// FeatureExtractor - clip-level feature extraction for the authenticity scorer
//
// This module reduces a whole mono clip to the three statistics the scorer
// consumes. Frame-level features are computed on centred frames and then
// summarised over the clip.
//
// Module organization:
// - types: Data structures (FeatureSummary)
// - fft: STFT with periodic Hann windowing
// - spectral: Frequency-domain features (centroid)
// - mfcc: Mel filterbank, dB conversion and DCT
// - temporal: Time-domain features (ZCR)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Statistics produced:
// 1. MFCC variance: population variance of all coefficients of all frames
// 2. Spectral centroid mean: mean of per-frame centroids (Hz)
// 3. ZCR mean: mean of per-frame zero-crossing rates

mod fft;
mod mfcc;
mod spectral;
mod temporal;
mod types;

pub use types::FeatureSummary;

use fft::StftProcessor;
use mfcc::{variance, MfccProcessor};
use spectral::SpectralFeatures;
use temporal::TemporalFeatures;

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;

/// FeatureExtractor coordinates the DSP pipeline for one sample rate
///
/// All tables (window, filterbank, DCT basis, FFT plan) are built once in
/// [`FeatureExtractor::new`] and only read afterwards, so one extractor can
/// serve concurrent callers.
pub struct FeatureExtractor {
    sample_rate: u32,
    stft: StftProcessor,
    spectral: SpectralFeatures,
    mfcc: MfccProcessor,
    temporal: TemporalFeatures,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz (e.g., 16000)
    /// * `config` - Window sizes and mel/MFCC parameters
    ///
    /// # Errors
    /// `InvalidSampleRate` for a zero rate, `InvalidConfig` for an
    /// unusable configuration
    pub fn new(sample_rate: u32, config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        if sample_rate == 0 {
            return Err(ExtractionError::InvalidSampleRate { sample_rate });
        }
        config.validate()?;

        Ok(Self {
            sample_rate,
            stft: StftProcessor::new(config.n_fft, config.hop_length),
            spectral: SpectralFeatures::new(sample_rate, config.n_fft),
            mfcc: MfccProcessor::new(
                sample_rate,
                config.n_fft,
                config.n_mels,
                config.n_mfcc,
                config.top_db,
            ),
            temporal: TemporalFeatures::new(config.zcr_frame_length, config.hop_length),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Extract the clip summary
    ///
    /// # Arguments
    /// * `samples` - Mono clip, nominally in [-1.0, 1.0]
    ///
    /// # Errors
    /// `EmptyAudio` when there is nothing to frame, `InvalidFeatures` when
    /// the clip holds non-finite samples or the summary leaves its domain
    pub fn extract(&self, samples: &[f32]) -> Result<FeatureSummary, ExtractionError> {
        if samples.is_empty() {
            return Err(ExtractionError::EmptyAudio);
        }
        if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
            return Err(ExtractionError::InvalidFeatures {
                reason: format!("sample {idx} is not finite"),
            });
        }

        let mut centroids = Vec::with_capacity(self.stft.frame_count(samples.len()));
        let mut mel_db = Vec::with_capacity(centroids.capacity());
        let mut scratch = Vec::new();

        self.stft.for_each_frame(samples, |spectrum| {
            centroids.push(self.spectral.compute_centroid(spectrum));
            mel_db.push(self.mfcc.mel_db_frame(spectrum, &mut scratch));
        });

        let zcr = self.temporal.zcr_frames(samples);
        if centroids.is_empty() || zcr.is_empty() {
            return Err(ExtractionError::EmptyAudio);
        }

        let cepstra = self.mfcc.cepstra(mel_db);
        let summary = FeatureSummary {
            mfcc_variance: variance(&cepstra),
            spectral_centroid_mean: mean(&centroids),
            zero_crossing_rate_mean: mean(&zcr),
        };

        tracing::debug!(
            "[FeatureExtractor] {} samples @ {} Hz -> {} frames, mfcc_var={:.3}, centroid={:.1}Hz, zcr={:.4}",
            samples.len(),
            self.sample_rate,
            centroids.len(),
            summary.mfcc_variance,
            summary.spectral_centroid_mean,
            summary.zero_crossing_rate_mean
        );

        summary.validate()?;
        Ok(summary)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Generate pure sine wave for testing
    fn generate_sine_wave(sample_rate: u32, frequency: f32, duration_samples: usize) -> Vec<f32> {
        (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    /// Generate seeded white noise for testing
    fn generate_white_noise(duration_samples: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..duration_samples)
            .map(|_| rng.gen_range(-0.5..0.5))
            .collect()
    }

    fn extractor(sample_rate: u32) -> FeatureExtractor {
        FeatureExtractor::new(sample_rate, &ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let result = FeatureExtractor::new(0, &ExtractionConfig::default());
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidSampleRate { sample_rate: 0 })
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ExtractionConfig {
            hop_length: 0,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            FeatureExtractor::new(16_000, &config),
            Err(ExtractionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_empty_clip_is_an_error() {
        assert_eq!(
            extractor(16_000).extract(&[]).unwrap_err(),
            ExtractionError::EmptyAudio
        );
    }

    #[test]
    fn test_centroid_tracks_sine_frequency() {
        let sample_rate = 16_000;
        let low = extractor(sample_rate)
            .extract(&generate_sine_wave(sample_rate, 440.0, 16_000))
            .unwrap();
        let high = extractor(sample_rate)
            .extract(&generate_sine_wave(sample_rate, 4000.0, 16_000))
            .unwrap();

        println!("440 Hz centroid: {}", low.spectral_centroid_mean);
        println!("4000 Hz centroid: {}", high.spectral_centroid_mean);
        assert!(
            low.spectral_centroid_mean > 300.0 && low.spectral_centroid_mean < 1000.0,
            "Expected centroid near 440 Hz, got {}",
            low.spectral_centroid_mean
        );
        assert!(high.spectral_centroid_mean > 3000.0);
    }

    #[test]
    fn test_zcr_sine_vs_noise() {
        let sample_rate = 16_000;
        let sine = extractor(sample_rate)
            .extract(&generate_sine_wave(sample_rate, 440.0, 16_000))
            .unwrap();
        let noise = extractor(sample_rate)
            .extract(&generate_white_noise(16_000))
            .unwrap();

        // A 440 Hz tone crosses zero 880 times a second
        assert!(
            sine.zero_crossing_rate_mean > 0.04 && sine.zero_crossing_rate_mean < 0.06,
            "Expected sine ZCR near 0.055, got {}",
            sine.zero_crossing_rate_mean
        );
        assert!(
            noise.zero_crossing_rate_mean > 0.4,
            "Expected noise ZCR > 0.4, got {}",
            noise.zero_crossing_rate_mean
        );
    }

    #[test]
    fn test_silence_summary() {
        let summary = extractor(16_000).extract(&vec![0.0; 8_000]).unwrap();

        assert_eq!(summary.spectral_centroid_mean, 0.0);
        assert_eq!(summary.zero_crossing_rate_mean, 0.0);
        assert!(summary.mfcc_variance.is_finite());
        assert!(summary.mfcc_variance >= 0.0);
    }

    #[test]
    fn test_short_clip_still_produces_features() {
        let sample_rate = 16_000;
        let summary = extractor(sample_rate)
            .extract(&generate_sine_wave(sample_rate, 1000.0, 256))
            .unwrap();
        assert!(summary.spectral_centroid_mean > 0.0);
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn test_nan_samples_are_rejected() {
        let mut clip = generate_sine_wave(16_000, 440.0, 4096);
        clip[100] = f32::NAN;
        let err = extractor(16_000).extract(&clip).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidFeatures { .. }));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let clip = generate_white_noise(8_000);
        let first = extractor(16_000).extract(&clip).unwrap();
        let second = extractor(16_000).extract(&clip).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FeatureExtractor>();
    }
}
