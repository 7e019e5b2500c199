pub mod analysis;
pub mod classifier;
pub mod config;
pub mod display;
pub mod export;
pub mod history;
pub mod lexicon;
pub mod scoring;
pub mod session;
pub mod suggestions;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub use analysis::Analyzer;
pub use classifier::{classify, Classification, ConfidenceRule};
pub use history::{HistoryEntry, HistoryLog, HistoryStats};
pub use scoring::{FixedJitter, Jitter, NoJitter, RandomJitter, ScoreMap};

// The text path reports `surprise` and the face path `surprised`; both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Surprised,
    Neutral,
}

impl Emotion {
    pub const TEXT_ORDER: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub const FACE_ORDER: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Fear,
        Emotion::Neutral,
    ];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "fear" => Some(Emotion::Fear),
            "surprise" => Some(Emotion::Surprise),
            "surprised" => Some(Emotion::Surprised),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Face,
}

impl Modality {
    pub fn label(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Face => "face",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakdown {
    entries: Vec<(Emotion, u8)>,
}

impl Breakdown {
    pub fn new(entries: Vec<(Emotion, u8)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, emotion: Emotion) -> Option<u8> {
        self.entries
            .iter()
            .find(|(label, _)| *label == emotion)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u8)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (emotion, value) in &self.entries {
            map.serialize_entry(emotion.label(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub modality: Modality,
    pub primary_emotion: Emotion,
    pub confidence: u8,
    pub emotion_breakdown: Breakdown,
    pub suggestions: Vec<String>,
}

pub fn format_percent(value: u8) -> String {
    format!("{}%", value)
}
