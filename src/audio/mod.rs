// Audio module - decoding audio containers into analysis-ready clips

pub mod wav;

// Re-export commonly used types for convenience
pub use wav::{read_wav, read_wav_from, DecodedAudio};
