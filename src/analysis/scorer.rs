// Scorer - heuristic synthetic/human verdict from clip-level features
//
// Turns a FeatureSummary into a verdict, a confidence and an explanation.
// Two separate rule sets run over the same thresholds:
//
// Confidence: per-feature sub-scores (0.3/0.8, 0.8/0.4, 0.7/0.4) averaged.
// Verdict:    three "synthetic indicators", majority of three wins.
//
// The centroid and ZCR conditions of the two rule sets are complementary
// except at the band edges, where both are false. They are kept as two
// independent conditionals; do not fold one into the other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::features::FeatureSummary;

/// MFCC variance below this counts toward a synthetic verdict
pub const MFCC_VAR_THRESHOLD: f64 = 50.0;

/// Lower edge of the typical speech centroid band (Hz, exclusive)
pub const CENTROID_LOW: f64 = 1000.0;

/// Upper edge of the typical speech centroid band (Hz, exclusive)
pub const CENTROID_HIGH: f64 = 3000.0;

/// Lower edge of the typical speech ZCR band (exclusive)
pub const ZCR_LOW: f64 = 0.02;

/// Upper edge of the typical speech ZCR band (exclusive)
pub const ZCR_HIGH: f64 = 0.15;

/// Indicators needed for a synthetic verdict
const MAJORITY: u8 = 2;

/// Audio verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioVerdict {
    /// Majority of synthetic indicators present
    Synthetic,
    /// Fewer than two synthetic indicators present
    Human,
}

impl AudioVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioVerdict::Synthetic => "synthetic",
            AudioVerdict::Human => "human",
        }
    }
}

impl fmt::Display for AudioVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-feature confidence contributions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub mfcc: f64,
    pub centroid: f64,
    pub zcr: f64,
}

impl SubScores {
    /// Arithmetic mean, summed left to right
    pub fn mean(&self) -> f64 {
        (self.mfcc + self.centroid + self.zcr) / 3.0
    }
}

/// Synthetic indicators used for the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicators {
    /// MFCC variance below threshold
    pub low_mfcc_variance: bool,
    /// Centroid outside the speech band
    pub atypical_centroid: bool,
    /// ZCR outside the speech band
    pub atypical_zcr: bool,
}

impl Indicators {
    pub fn count(&self) -> u8 {
        [
            self.low_mfcc_variance,
            self.atypical_centroid,
            self.atypical_zcr,
        ]
        .iter()
        .filter(|&&hit| hit)
        .count() as u8
    }

    pub fn verdict(&self) -> AudioVerdict {
        if self.count() >= MAJORITY {
            AudioVerdict::Synthetic
        } else {
            AudioVerdict::Human
        }
    }
}

/// Scorer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub verdict: AudioVerdict,
    /// Mean of the three sub-scores, always within [0.3, 0.8]
    pub confidence: f64,
    pub explanation: String,
}

/// Stateless heuristic scorer
///
/// Holds no data; every call is a pure function of its input, so a single
/// value can be copied into or shared between any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAudioScorer;

impl HeuristicAudioScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a validated feature summary
    ///
    /// # Arguments
    /// * `features` - Summary whose fields are finite and within range
    ///
    /// # Returns
    /// Verdict from the indicator vote, confidence from the sub-scores, and
    /// an explanation embedding the three raw inputs
    pub fn score(&self, features: &FeatureSummary) -> ScoreResult {
        let confidence = self.sub_scores(features).mean();
        let verdict = self.indicators(features).verdict();

        ScoreResult {
            verdict,
            confidence,
            explanation: explain(verdict, features),
        }
    }

    /// Confidence contributions ("inside the band is good")
    pub fn sub_scores(&self, features: &FeatureSummary) -> SubScores {
        let mfcc = if features.mfcc_variance < MFCC_VAR_THRESHOLD {
            0.3
        } else {
            0.8
        };

        let centroid = if CENTROID_LOW < features.spectral_centroid_mean
            && features.spectral_centroid_mean < CENTROID_HIGH
        {
            0.8
        } else {
            0.4
        };

        let zcr = if ZCR_LOW < features.zero_crossing_rate_mean
            && features.zero_crossing_rate_mean < ZCR_HIGH
        {
            0.7
        } else {
            0.4
        };

        SubScores {
            mfcc,
            centroid,
            zcr,
        }
    }

    /// Verdict indicators ("outside the band is bad")
    pub fn indicators(&self, features: &FeatureSummary) -> Indicators {
        let centroid = features.spectral_centroid_mean;
        let zcr = features.zero_crossing_rate_mean;

        Indicators {
            low_mfcc_variance: features.mfcc_variance < MFCC_VAR_THRESHOLD,
            atypical_centroid: centroid < CENTROID_LOW || centroid > CENTROID_HIGH,
            atypical_zcr: zcr < ZCR_LOW || zcr > ZCR_HIGH,
        }
    }
}

fn explain(verdict: AudioVerdict, features: &FeatureSummary) -> String {
    format!(
        "Audio features suggest {} origin. MFCC variance: {:.1}, Spectral centroid: {:.1}Hz, ZCR: {:.3}",
        verdict,
        features.mfcc_variance,
        features.spectral_centroid_mean,
        features.zero_crossing_rate_mean
    )
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
