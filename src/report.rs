// Report module - JSON detection reports
//
// Every detection, successful or not, is rendered as the same four-field
// body: {"type", "result", "confidence", "explanation"}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::scorer::{AudioVerdict, ScoreResult};

/// Media kind carried in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
        }
    }
}

/// Value of the `result` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Synthetic,
    Human,
    Deepfake,
    Real,
    /// Decoding, extraction or inference failed; confidence is 0.0
    Error,
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error)
    }
}

impl From<AudioVerdict> for Outcome {
    fn from(verdict: AudioVerdict) -> Self {
        match verdict {
            AudioVerdict::Synthetic => Outcome::Synthetic,
            AudioVerdict::Human => Outcome::Human,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Synthetic => "synthetic",
            Outcome::Human => "human",
            Outcome::Deepfake => "deepfake",
            Outcome::Real => "real",
            Outcome::Error => "error",
        };
        f.write_str(label)
    }
}

/// Response body handed to transport or to a conversational reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub result: Outcome,
    pub confidence: f64,
    pub explanation: String,
}

impl DetectionReport {
    /// Render a scorer result as an audio report
    pub fn from_score(score: &ScoreResult) -> Self {
        Self {
            kind: MediaKind::Audio,
            result: score.verdict.into(),
            confidence: score.confidence,
            explanation: score.explanation.clone(),
        }
    }

    /// Render a failure
    pub fn error(kind: MediaKind, message: impl fmt::Display) -> Self {
        let subject = match kind {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
        };
        Self {
            kind,
            result: Outcome::Error,
            confidence: 0.0,
            explanation: format!("Error processing {subject}: {message}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.is_error()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for DetectionReport {
    /// One-line summary for chat-style replies
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            return f.write_str(&self.explanation);
        }
        write!(
            f,
            "{} verdict: {} ({:.1}% confidence). {}",
            self.kind.as_str(),
            self.result,
            self.confidence * 100.0,
            self.explanation
        )
    }
}
