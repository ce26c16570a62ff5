// MFCC module - Mel-frequency cepstral coefficients
//
// Pipeline per frame: power spectrum -> Slaney mel filterbank -> dB.
// Once every frame is known the dB values are floored at (global max - top_db)
// and an orthonormal DCT-II keeps the first n_mfcc coefficients.
//
// References:
// - Slaney, M. (1998). Auditory Toolbox, Technical Report #1998-010
// - Davis, S. & Mermelstein, P. (1980). Comparison of parametric
//   representations for monosyllabic word recognition

use super::spectral::fft_frequencies;

/// Floor applied to power before taking the logarithm
const AMIN: f64 = 1e-10;

// Slaney mel scale: linear below 1 kHz, logarithmic above
const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Convert Hz to Slaney mels
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Convert Slaney mels to Hz
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// One triangular mel band, stored as the run of non-zero bin weights
#[derive(Debug, Clone)]
struct MelBand {
    first_bin: usize,
    weights: Vec<f64>,
}

/// Slaney-normalised triangular mel filterbank spanning 0 Hz to Nyquist
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    bands: Vec<MelBand>,
}

impl MelFilterbank {
    pub fn new(sample_rate: u32, n_fft: usize, n_mels: usize) -> Self {
        let fft_freqs = fft_frequencies(sample_rate, n_fft);
        let mel_min = hz_to_mel(0.0);
        let mel_max = hz_to_mel(sample_rate as f64 / 2.0);

        let n_points = n_mels + 2;
        let mel_f: Vec<f64> = (0..n_points)
            .map(|i| {
                let mel = mel_min + (mel_max - mel_min) * i as f64 / (n_points - 1) as f64;
                mel_to_hz(mel)
            })
            .collect();

        let bands = (0..n_mels)
            .map(|m| {
                let (left, centre, right) = (mel_f[m], mel_f[m + 1], mel_f[m + 2]);
                let enorm = 2.0 / (right - left);

                let dense: Vec<f64> = fft_freqs
                    .iter()
                    .map(|&f| {
                        let lower = (f - left) / (centre - left);
                        let upper = (right - f) / (right - centre);
                        lower.min(upper).max(0.0) * enorm
                    })
                    .collect();

                let first_bin = dense.iter().position(|&w| w > 0.0).unwrap_or(0);
                let last_bin = dense
                    .iter()
                    .rposition(|&w| w > 0.0)
                    .map(|i| i + 1)
                    .unwrap_or(first_bin);

                MelBand {
                    first_bin,
                    weights: dense[first_bin..last_bin].to_vec(),
                }
            })
            .collect();

        Self { bands }
    }

    /// Project a magnitude spectrum onto mel bands as power
    pub fn apply(&self, magnitude: &[f32], out: &mut Vec<f64>) {
        out.clear();
        for band in &self.bands {
            let energy = band
                .weights
                .iter()
                .zip(&magnitude[band.first_bin..])
                .map(|(&w, &m)| {
                    let m = m as f64;
                    w * m * m
                })
                .sum::<f64>();
            out.push(energy);
        }
    }
}

/// Accumulates mel frames for a clip and produces the MFCC matrix
pub struct MfccProcessor {
    filterbank: MelFilterbank,
    /// `n_mfcc x n_mels` orthonormal DCT-II basis
    dct: Vec<Vec<f64>>,
    top_db: f64,
}

impl MfccProcessor {
    pub fn new(sample_rate: u32, n_fft: usize, n_mels: usize, n_mfcc: usize, top_db: f64) -> Self {
        Self {
            filterbank: MelFilterbank::new(sample_rate, n_fft, n_mels),
            dct: dct_ii_basis(n_mfcc, n_mels),
            top_db,
        }
    }

    /// Log-mel value of one frame (dB, before top_db flooring)
    pub fn mel_db_frame(&self, magnitude: &[f32], scratch: &mut Vec<f64>) -> Vec<f64> {
        self.filterbank.apply(magnitude, scratch);
        scratch.iter().map(|&p| power_to_db(p)).collect()
    }

    /// Turn per-frame log-mel values into per-frame cepstra
    pub fn cepstra(&self, mut mel_db: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        let global_max = mel_db
            .iter()
            .flat_map(|frame| frame.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        let floor = global_max - self.top_db;

        for frame in mel_db.iter_mut() {
            for value in frame.iter_mut() {
                *value = value.max(floor);
            }
        }

        mel_db
            .iter()
            .map(|frame| {
                self.dct
                    .iter()
                    .map(|basis| basis.iter().zip(frame).map(|(b, v)| b * v).sum::<f64>())
                    .collect()
            })
            .collect()
    }
}

/// `10 * log10(max(power, AMIN))` relative to a reference power of 1.0
pub fn power_to_db(power: f64) -> f64 {
    10.0 * power.max(AMIN).log10()
}

/// Orthonormal DCT-II basis rows for the first `n_out` coefficients
fn dct_ii_basis(n_out: usize, n_in: usize) -> Vec<Vec<f64>> {
    let n = n_in as f64;
    (0..n_out)
        .map(|k| {
            let scale = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            (0..n_in)
                .map(|i| {
                    scale
                        * (std::f64::consts::PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n))
                            .cos()
                })
                .collect()
        })
        .collect()
}

/// Population variance over every value of every frame
pub fn variance(frames: &[Vec<f64>]) -> f64 {
    let count = frames.iter().map(Vec::len).sum::<usize>();
    if count == 0 {
        return 0.0;
    }

    let mean = frames.iter().flatten().sum::<f64>() / count as f64;
    frames
        .iter()
        .flatten()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / count as f64
}
