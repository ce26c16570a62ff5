// WAV decoding - read a WAV container into a mono f32 clip
//
// Integer PCM is scaled by 2^(bits - 1) into [-1.0, 1.0). Multi-channel
// audio is down-mixed by averaging the channels of each frame. The native
// sample rate is kept; nothing is resampled.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ExtractionError;

/// Decoded mono clip
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Native sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source before down-mixing
    pub channels: u16,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a WAV file from disk
///
/// Only the open itself is reported with the path; header problems map the
/// same way as for [`read_wav_from`].
pub fn read_wav(path: &Path) -> Result<DecodedAudio, ExtractionError> {
    let file = File::open(path).map_err(|err| ExtractionError::Decode {
        reason: format!("opening {}: {}", path.display(), err),
    })?;
    read_wav_from(BufReader::new(file))
}

/// Read a WAV stream from any reader (e.g. an in-memory upload)
pub fn read_wav_from<R: Read>(source: R) -> Result<DecodedAudio, ExtractionError> {
    let reader = hound::WavReader::new(source)?;
    decode(reader)
}

fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<DecodedAudio, ExtractionError> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(ExtractionError::UnsupportedFormat {
            reason: "WAV header declares zero channels".to_string(),
        });
    }
    if spec.sample_rate == 0 {
        return Err(ExtractionError::InvalidSampleRate {
            sample_rate: spec.sample_rate,
        });
    }

    let interleaved = match spec.sample_format {
        hound::SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(ExtractionError::UnsupportedFormat {
                    reason: format!("{}-bit float samples", spec.bits_per_sample),
                });
            }
            reader
                .samples::<f32>()
                .collect::<Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Int => match spec.bits_per_sample {
            8 | 16 | 24 | 32 => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|value| value as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()?
            }
            other => {
                return Err(ExtractionError::UnsupportedFormat {
                    reason: format!("{other} bits per sample"),
                })
            }
        },
    };

    let samples = downmix(&interleaved, spec.channels as usize);
    tracing::debug!(
        "[WavDecoder] {} channel(s), {} Hz, {} frames",
        spec.channels,
        spec.sample_rate,
        samples.len()
    );

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Average interleaved channels into one
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
