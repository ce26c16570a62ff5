use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use audio_verdict::analysis::{HeuristicAudioScorer, Indicators, SubScores};
use audio_verdict::audio::read_wav;
use audio_verdict::{AppConfig, AudioDetector, DetectionReport, FeatureSummary};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "audio_verdict",
    about = "Heuristic synthetic-vs-human audio scoring harness"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a precomputed feature summary
    Score {
        #[arg(long, allow_hyphen_values = true)]
        mfcc_variance: f64,
        #[arg(long, allow_hyphen_values = true)]
        centroid: f64,
        #[arg(long, allow_hyphen_values = true)]
        zcr: f64,
        /// Include sub-scores and indicators in the output
        #[arg(long)]
        explain: bool,
    },
    /// Decode a WAV file, extract features and score them
    Analyze {
        wav: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        /// JSON config file (defaults to $AUDIO_VERDICT_CONFIG or the bundled asset)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the extracted feature summary of a WAV file
    Features {
        wav: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            mfcc_variance,
            centroid,
            zcr,
            explain,
        } => run_score(FeatureSummary::new(mfcc_variance, centroid, zcr), explain),
        Commands::Analyze {
            wav,
            output,
            config,
        } => run_analyze(&wav, output, config),
        Commands::Features { wav, config } => run_features(&wav, config),
    }
}

fn run_score(summary: FeatureSummary, explain: bool) -> Result<ExitCode> {
    let report = AudioDetector::default().detect_features(&summary);
    let breakdown = if explain && !report.is_error() {
        let scorer = HeuristicAudioScorer::new();
        Some(Breakdown {
            sub_scores: scorer.sub_scores(&summary),
            indicators: scorer.indicators(&summary),
        })
    } else {
        None
    };

    let payload = ScorePayload {
        report: &report,
        breakdown,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(exit_code(&report))
}

fn run_analyze(wav: &Path, output_path: Option<PathBuf>, config: Option<PathBuf>) -> Result<ExitCode> {
    let detector = AudioDetector::new(load_config(config).extraction);
    let report = detector.detect_wav(wav);
    let json = report.to_json_pretty()?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(exit_code(&report))
}

fn run_features(wav: &Path, config: Option<PathBuf>) -> Result<ExitCode> {
    let detector = AudioDetector::new(load_config(config).extraction);
    let audio = read_wav(wav).with_context(|| format!("decoding {}", wav.display()))?;
    let summary = detector
        .extract(&audio.samples, audio.sample_rate)
        .with_context(|| format!("extracting features from {}", wav.display()))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::from(0))
}

fn load_config(path: Option<PathBuf>) -> AppConfig {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    }
}

fn exit_code(report: &DetectionReport) -> ExitCode {
    if report.is_error() {
        ExitCode::from(2)
    } else {
        ExitCode::from(0)
    }
}

#[derive(Serialize)]
struct ScorePayload<'a> {
    #[serde(flatten)]
    report: &'a DetectionReport,
    #[serde(flatten)]
    breakdown: Option<Breakdown>,
}

#[derive(Serialize)]
struct Breakdown {
    sub_scores: SubScores,
    indicators: Indicators,
}
