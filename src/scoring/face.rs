//! Simulated face scoring.
//!
//! There is no perception model behind this path. Each call samples scores
//! around a fixed prior so the classifier, history and capture session can be
//! exercised with synthetic input; a real model would replace `FaceScorer`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Jitter, ScoreMap};
use crate::Emotion;

const FACE_PRIOR: [(Emotion, f64); 6] = [
    (Emotion::Happy, 0.3),
    (Emotion::Sad, 0.1),
    (Emotion::Angry, 0.1),
    (Emotion::Surprised, 0.15),
    (Emotion::Fear, 0.05),
    (Emotion::Neutral, 0.3),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSignal {
    pub width: u32,
    pub height: u32,
    pub captured_at: DateTime<Utc>,
}

impl FrameSignal {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            captured_at: Utc::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone)]
pub struct FaceScorer {
    prior: Vec<(Emotion, f64)>,
    spread: f64,
}

impl Default for FaceScorer {
    fn default() -> Self {
        Self {
            prior: FACE_PRIOR.to_vec(),
            spread: 20.0,
        }
    }
}

impl FaceScorer {
    pub fn score<J: Jitter>(&self, _frame: &FrameSignal, jitter: &mut J) -> ScoreMap {
        let entries = self
            .prior
            .iter()
            .map(|(emotion, weight)| {
                let base = weight * 100.0;
                let variation = jitter.sample(-self.spread, self.spread);
                (*emotion, (base + variation).clamp(0.0, 100.0))
            })
            .collect();
        ScoreMap::from_entries(entries)
    }
}
