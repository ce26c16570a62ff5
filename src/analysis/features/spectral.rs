// Spectral module - Frequency-domain feature extraction
//
// This module computes spectral features from magnitude spectra.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Spectral feature computation functions
pub struct SpectralFeatures {
    /// Centre frequency of each bin in Hz
    bin_freqs: Vec<f64>,
}

impl SpectralFeatures {
    /// Create a new spectral features processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `n_fft` - FFT window size
    pub fn new(sample_rate: u32, n_fft: usize) -> Self {
        Self {
            bin_freqs: fft_frequencies(sample_rate, n_fft),
        }
    }

    /// Compute spectral centroid (weighted mean frequency)
    ///
    /// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|
    ///
    /// The spectral centroid represents the "center of mass" of the spectrum,
    /// and is a measure of the brightness of a sound.
    ///
    /// # Arguments
    /// * `spectrum` - Magnitude spectrum
    ///
    /// # Returns
    /// Spectral centroid in Hz, or 0.0 for an all-zero frame
    pub fn compute_centroid(&self, spectrum: &[f32]) -> f64 {
        let mut weighted_sum = 0.0f64;
        let mut magnitude_sum = 0.0f64;

        for (&freq, &mag) in self.bin_freqs.iter().zip(spectrum.iter()) {
            weighted_sum += freq * mag as f64;
            magnitude_sum += mag as f64;
        }

        if magnitude_sum > f64::MIN_POSITIVE {
            weighted_sum / magnitude_sum
        } else {
            0.0
        }
    }
}

/// Bin centre frequencies `k * sr / n_fft` for `k` in `0..=n_fft/2`
pub fn fft_frequencies(sample_rate: u32, n_fft: usize) -> Vec<f64> {
    let bin_width = sample_rate as f64 / n_fft as f64;
    (0..=n_fft / 2).map(|k| k as f64 * bin_width).collect()
}
