// FFT module - Short-time Fourier transform over a whole clip
//
// Frames are centred: the clip is zero-padded by n_fft / 2 on both sides so
// frame t is centred on sample t * hop_length. Each frame is multiplied by a
// periodic Hann window before the FFT.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// STFT processor that yields one magnitude spectrum per frame
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    n_fft: usize,
    hop_length: usize,
    /// Periodic Hann window (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - FFT window size
    /// * `hop_length` - Samples between successive frames
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        let window = (0..n_fft)
            .map(|i| {
                0.5 - 0.5 * ((2.0 * std::f32::consts::PI * i as f32) / n_fft as f32).cos()
            })
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n_fft);

        Self {
            fft,
            n_fft,
            hop_length,
            window,
        }
    }

    /// Number of spectrum bins per frame (positive frequencies only)
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for a clip of `n_samples`
    pub fn frame_count(&self, n_samples: usize) -> usize {
        if n_samples == 0 {
            return 0;
        }
        let padded = n_samples + 2 * (self.n_fft / 2);
        if padded < self.n_fft {
            0
        } else {
            1 + (padded - self.n_fft) / self.hop_length
        }
    }

    /// Visit the magnitude spectrum of every frame in order
    ///
    /// The spectrum slice has `n_bins()` entries and is only valid for the
    /// duration of the callback.
    pub fn for_each_frame<F>(&self, samples: &[f32], mut visit: F)
    where
        F: FnMut(&[f32]),
    {
        let pad = self.n_fft / 2;
        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.n_fft];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); self.fft.get_inplace_scratch_len()];
        let mut magnitude = vec![0.0f32; self.n_bins()];

        for frame in 0..self.frame_count(samples.len()) {
            // Position of the frame start in the unpadded signal (may be negative)
            let start = (frame * self.hop_length) as isize - pad as isize;

            for (i, slot) in buffer.iter_mut().enumerate() {
                let idx = start + i as isize;
                let sample = if idx >= 0 && (idx as usize) < samples.len() {
                    samples[idx as usize]
                } else {
                    0.0
                };
                *slot = Complex::new(sample * self.window[i], 0.0);
            }

            self.fft.process_with_scratch(&mut buffer, &mut scratch);

            for (mag, bin) in magnitude.iter_mut().zip(buffer.iter()) {
                *mag = bin.norm();
            }
            visit(&magnitude);
        }
    }
}
