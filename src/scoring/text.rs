use crate::lexicon::{KeywordPattern, Lexicon};
use crate::scoring::{Jitter, ScoreMap};
use crate::Emotion;

pub const TEXT_NOISE_CEILING: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct TextScorer {
    patterns: Vec<KeywordPattern>,
}

impl TextScorer {
    pub fn new(lexicon: &Lexicon) -> Result<Self, String> {
        Ok(Self {
            patterns: lexicon.compile()?,
        })
    }

    pub fn raw_counts(&self, text: &str) -> ScoreMap {
        let lowered = text.to_lowercase();
        let mut scores = ScoreMap::zeroed(&Emotion::TEXT_ORDER);
        for pattern in &self.patterns {
            scores.set(pattern.emotion, pattern.count(&lowered) as f64);
        }
        scores
    }

    pub fn score<J: Jitter>(&self, text: &str, jitter: &mut J) -> ScoreMap {
        let counts = self.raw_counts(text);
        let perturbed = counts
            .iter()
            .map(|(emotion, count)| (emotion, count + jitter.sample(0.0, TEXT_NOISE_CEILING)))
            .collect();
        ScoreMap::from_entries(perturbed)
    }
}
