//! Integration tests for the detection pipeline
//!
//! These tests drive the public library API end to end:
//! - WAV files written with hound, decoded, extracted and scored
//! - Error reports for unreadable input
//! - Shared scorer and extractor across threads

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use audio_verdict::{
    AudioDetector, ExtractionConfig, FeatureExtractor, FeatureSummary, HeuristicAudioScorer,
    MediaKind, Outcome,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn sine(sample_rate: u32, frequency: f32, seconds: f32) -> Vec<f32> {
    let len = (sample_rate as f32 * seconds) as usize;
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

fn white_noise(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-0.5..0.5)).collect()
}

/// Write a 16-bit WAV into the temp dir, duplicating the signal per channel
fn write_wav(name: &str, samples: &[f32], sample_rate: u32, channels: u16) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "audio_verdict_{}_{}.wav",
        name,
        std::process::id()
    ));
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
    for &sample in samples {
        let value = (sample * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(value).expect("write sample");
        }
    }
    writer.finalize().expect("finalize wav");
    path
}

#[test]
fn test_mid_band_tone_wav_is_human() {
    let path = write_wav("tone", &sine(44_100, 1500.0, 1.0), 44_100, 1);
    let report = AudioDetector::default().detect_wav(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(report.kind, MediaKind::Audio);
    assert_eq!(report.result, Outcome::Human, "{}", report.explanation);
    assert!(report.confidence >= 0.3 && report.confidence <= 0.8);
    assert!(report
        .explanation
        .starts_with("Audio features suggest human origin. MFCC variance: "));
}

#[test]
fn test_white_noise_wav_is_synthetic() {
    let path = write_wav("noise", &white_noise(48_000, 11), 48_000, 1);
    let report = AudioDetector::default().detect_wav(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(report.result, Outcome::Synthetic, "{}", report.explanation);
}

#[test]
fn test_silent_wav_is_synthetic() {
    // Zero centroid and zero ZCR both sit outside their bands
    let path = write_wav("silence", &vec![0.0; 22_050], 22_050, 1);
    let report = AudioDetector::default().detect_wav(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(report.result, Outcome::Synthetic, "{}", report.explanation);
}

#[test]
fn test_stereo_wav_matches_mono() {
    let clip = sine(44_100, 1500.0, 0.5);
    let mono = write_wav("mono", &clip, 44_100, 1);
    let stereo = write_wav("stereo", &clip, 44_100, 2);

    let detector = AudioDetector::default();
    let mono_report = detector.detect_wav(&mono);
    let stereo_report = detector.detect_wav(&stereo);
    let _ = std::fs::remove_file(&mono);
    let _ = std::fs::remove_file(&stereo);

    assert_eq!(mono_report, stereo_report);
}

#[test]
fn test_corrupt_wav_yields_error_report() {
    let path = std::env::temp_dir().join(format!("audio_verdict_corrupt_{}.wav", std::process::id()));
    std::fs::write(&path, b"RIFF....not really").expect("write corrupt file");
    let report = AudioDetector::default().detect_wav(&path);
    let _ = std::fs::remove_file(&path);

    assert!(report.is_error());
    assert_eq!(report.confidence, 0.0);
    assert!(report.explanation.starts_with("Error processing audio: "));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "audio");
    assert_eq!(json["result"], "error");
}

#[test]
fn test_concrete_scenarios_through_detector() {
    let detector = AudioDetector::default();
    let cases = [
        ((10.0, 2000.0, 0.05), Outcome::Human, 0.6),
        ((80.0, 500.0, 0.30), Outcome::Synthetic, 0.533),
        ((10.0, 500.0, 0.30), Outcome::Synthetic, 0.367),
        ((80.0, 2000.0, 0.05), Outcome::Human, 0.767),
    ];

    for ((mfcc, centroid, zcr), expected, confidence) in cases {
        let report = detector.detect_features(&FeatureSummary::new(mfcc, centroid, zcr));
        assert_eq!(report.result, expected, "features ({mfcc}, {centroid}, {zcr})");
        assert!((report.confidence - confidence).abs() < 1e-3);
    }
}

#[test]
fn test_shared_extractor_across_threads() {
    let extractor = Arc::new(FeatureExtractor::new(16_000, &ExtractionConfig::default()).unwrap());
    let scorer = HeuristicAudioScorer::new();
    let clip = Arc::new(white_noise(16_000, 3));
    let expected = scorer.score(&extractor.extract(&clip).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = Arc::clone(&extractor);
            let clip = Arc::clone(&clip);
            thread::spawn(move || scorer.score(&extractor.extract(&clip).unwrap()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
