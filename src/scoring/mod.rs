pub mod face;
pub mod jitter;
pub mod text;

pub use face::{FaceScorer, FrameSignal};
pub use jitter::{FixedJitter, Jitter, NoJitter, RandomJitter};
pub use text::TextScorer;

use crate::Emotion;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(Emotion, f64)>,
}

impl ScoreMap {
    pub fn zeroed(order: &[Emotion]) -> Self {
        Self {
            entries: order.iter().map(|emotion| (*emotion, 0.0)).collect(),
        }
    }

    pub fn from_entries(entries: Vec<(Emotion, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, emotion: Emotion) -> Option<f64> {
        self.entries
            .iter()
            .find(|(label, _)| *label == emotion)
            .map(|(_, score)| *score)
    }

    pub fn set(&mut self, emotion: Emotion, score: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(label, _)| *label == emotion) {
            entry.1 = score;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    pub fn max(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, score)| *score)
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
