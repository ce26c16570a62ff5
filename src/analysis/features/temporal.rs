// Temporal module - Time-domain feature extraction
//
// Zero-crossing rate over centred frames. The clip is edge-padded by
// frame_length / 2 (repeating the first and last sample) so frame t is
// centred on sample t * hop_length.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Magnitudes at or below this are treated as exact (positive) zero
const ZERO_THRESHOLD: f32 = 1e-10;

/// Temporal feature computation functions
pub struct TemporalFeatures {
    frame_length: usize,
    hop_length: usize,
}

impl TemporalFeatures {
    /// Create a new temporal features processor
    ///
    /// # Arguments
    /// * `frame_length` - Samples per ZCR frame
    /// * `hop_length` - Samples between successive frames
    pub fn new(frame_length: usize, hop_length: usize) -> Self {
        Self {
            frame_length,
            hop_length,
        }
    }

    /// Compute zero-crossing rate of a single frame
    ///
    /// A crossing is a change of sign bit between consecutive samples after
    /// near-zero samples have been snapped to +0. The count is divided by
    /// the frame length.
    ///
    /// # Returns
    /// Zero-crossing rate (0.0 to 1.0)
    pub fn compute_zcr(&self, frame: &[f32]) -> f64 {
        if frame.is_empty() {
            return 0.0;
        }

        let negative = |x: f32| x.abs() > ZERO_THRESHOLD && x.is_sign_negative();
        let crossings = frame
            .windows(2)
            .filter(|pair| negative(pair[0]) != negative(pair[1]))
            .count();

        crossings as f64 / frame.len() as f64
    }

    /// Zero-crossing rate of every centred frame of the clip
    pub fn zcr_frames(&self, samples: &[f32]) -> Vec<f64> {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Vec::new(),
        };

        let pad = self.frame_length / 2;
        let mut padded = Vec::with_capacity(samples.len() + 2 * pad);
        padded.extend(std::iter::repeat(first).take(pad));
        padded.extend_from_slice(samples);
        padded.extend(std::iter::repeat(last).take(pad));

        if padded.len() < self.frame_length {
            return Vec::new();
        }

        let n_frames = 1 + (padded.len() - self.frame_length) / self.hop_length;
        (0..n_frames)
            .map(|t| {
                let start = t * self.hop_length;
                self.compute_zcr(&padded[start..start + self.frame_length])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_signal_crosses_every_sample() {
        let temporal = TemporalFeatures::new(8, 4);
        let frame = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        // 7 crossings over 8 samples
        assert_eq!(temporal.compute_zcr(&frame), 7.0 / 8.0);
    }

    #[test]
    fn test_near_zero_samples_count_as_positive() {
        let temporal = TemporalFeatures::new(4, 2);
        assert_eq!(temporal.compute_zcr(&[1.0, -1e-12, 0.5, 0.25]), 0.0);
        assert_eq!(temporal.compute_zcr(&[0.0, -0.5, 0.0, -0.5]), 3.0 / 4.0);
        assert_eq!(temporal.compute_zcr(&[-0.0, 0.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_zcr_frames_count_and_padding() {
        let temporal = TemporalFeatures::new(4, 2);
        let samples = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0];
        let frames = temporal.zcr_frames(&samples);

        // padded length 10 -> 1 + (10 - 4) / 2 frames
        assert_eq!(frames.len(), 4);
        // First frame: [-1, -1, -1, 1] (edge padding repeats the first sample)
        assert_eq!(frames[0], 1.0 / 4.0);
        // Second frame: [-1, 1, -1, 1]
        assert_eq!(frames[1], 3.0 / 4.0);
        // Last frame: [-1, 1, 1, 1]
        assert_eq!(frames[3], 1.0 / 4.0);
    }

    #[test]
    fn test_zcr_of_silence_is_zero() {
        let temporal = TemporalFeatures::new(2048, 512);
        let frames = temporal.zcr_frames(&vec![0.0; 10_000]);
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_zcr_frames_empty_input() {
        let temporal = TemporalFeatures::new(2048, 512);
        assert!(temporal.zcr_frames(&[]).is_empty());
    }
}
