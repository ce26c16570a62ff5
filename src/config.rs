//! Configuration management for feature extraction
//!
//! This module provides runtime configuration loading from JSON files so the
//! analysis window sizes can be adjusted without recompilation. The scorer
//! thresholds are deliberately absent: they are fixed constants in
//! [`crate::analysis::scorer`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ExtractionError;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "AUDIO_VERDICT_CONFIG";

/// Config file used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "assets/audio_verdict.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Feature extraction parameters (librosa defaults)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// STFT window size in samples
    pub n_fft: usize,
    /// Hop between successive STFT and ZCR frames
    pub hop_length: usize,
    /// Number of mel bands
    pub n_mels: usize,
    /// Number of cepstral coefficients kept after the DCT
    pub n_mfcc: usize,
    /// Frame length for zero-crossing rate
    pub zcr_frame_length: usize,
    /// Dynamic range (dB) kept below the loudest mel bin
    pub top_db: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            n_mfcc: 13,
            zcr_frame_length: 2048,
            top_db: 80.0,
        }
    }
}

impl ExtractionConfig {
    /// Reject parameter combinations the extractor cannot run with
    pub fn validate(&self) -> Result<(), ExtractionError> {
        let invalid = |reason: String| Err(ExtractionError::InvalidConfig { reason });

        if self.n_fft == 0 || self.hop_length == 0 || self.zcr_frame_length == 0 {
            return invalid("n_fft, hop_length and zcr_frame_length must be > 0".to_string());
        }
        if self.hop_length > self.n_fft {
            return invalid(format!(
                "hop_length {} exceeds n_fft {}",
                self.hop_length, self.n_fft
            ));
        }
        if self.n_mels == 0 || self.n_mfcc == 0 {
            return invalid("n_mels and n_mfcc must be > 0".to_string());
        }
        if self.n_mfcc > self.n_mels {
            return invalid(format!(
                "n_mfcc {} exceeds n_mels {}",
                self.n_mfcc, self.n_mels
            ));
        }
        if !(self.top_db.is_finite() && self.top_db >= 0.0) {
            return invalid(format!("top_db {} must be finite and >= 0", self.top_db));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing, its
    /// JSON is invalid, or its extraction parameters fail validation
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(config) => match config.extraction.validate() {
                    Ok(()) => {
                        log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                        config
                    }
                    Err(err) => {
                        log::warn!(
                            "[Config] Rejected configuration from {:?}: {}. Using defaults.",
                            path.as_ref(),
                            err
                        );
                        Self::default()
                    }
                },
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load from `$AUDIO_VERDICT_CONFIG`, falling back to the bundled path
    pub fn load() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load_from_file(path),
            _ => Self::load_from_file(DEFAULT_CONFIG_PATH),
        }
    }
}
