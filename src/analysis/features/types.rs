// Types module - Data structures for clip-level audio features
//
// This module defines the summary statistics handed from feature extraction
// to the scorer.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Clip-level acoustic summary consumed by the scorer
///
/// Each field is a single statistic taken over every analysis frame of the
/// clip. Values are produced by [`super::FeatureExtractor`] or supplied
/// directly by a caller that computed them elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// Population variance of all MFCC coefficients over all frames
    ///
    /// Synthetic voices tend to produce more regular cepstra and therefore
    /// a lower variance.
    pub mfcc_variance: f64,

    /// Mean spectral centroid in Hz
    pub spectral_centroid_mean: f64,

    /// Mean zero-crossing rate (0.0 to 1.0)
    pub zero_crossing_rate_mean: f64,
}

impl FeatureSummary {
    pub fn new(mfcc_variance: f64, spectral_centroid_mean: f64, zero_crossing_rate_mean: f64) -> Self {
        Self {
            mfcc_variance,
            spectral_centroid_mean,
            zero_crossing_rate_mean,
        }
    }

    /// Check the declared domain of every field
    ///
    /// The scorer assumes validated input; callers run this first and turn a
    /// failure into an `error` report instead of scoring.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        let fields = [
            ("MFCC variance", self.mfcc_variance),
            ("spectral centroid", self.spectral_centroid_mean),
            ("ZCR", self.zero_crossing_rate_mean),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ExtractionError::InvalidFeatures {
                    reason: format!("{name} is not finite ({value})"),
                });
            }
        }

        if self.mfcc_variance < 0.0 {
            return Err(ExtractionError::InvalidFeatures {
                reason: format!("MFCC variance {} is negative", self.mfcc_variance),
            });
        }
        if self.spectral_centroid_mean < 0.0 {
            return Err(ExtractionError::InvalidFeatures {
                reason: format!(
                    "spectral centroid {} Hz is negative",
                    self.spectral_centroid_mean
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.zero_crossing_rate_mean) {
            return Err(ExtractionError::InvalidFeatures {
                reason: format!(
                    "ZCR {} outside [0, 1]",
                    self.zero_crossing_rate_mean
                ),
            });
        }

        Ok(())
    }
}
