use tracing::debug;

use crate::classifier::{classify, ConfidenceRule};
use crate::lexicon::Lexicon;
use crate::scoring::{FaceScorer, FrameSignal, Jitter, ScoreMap, TextScorer};
use crate::suggestions::suggestions_for;
use crate::{AnalysisResult, Breakdown, Modality};

const EMPTY_BREAKDOWN_CEILING: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct Analyzer<J> {
    text: TextScorer,
    face: FaceScorer,
    jitter: J,
}

impl<J: Jitter> Analyzer<J> {
    pub fn new(jitter: J) -> Result<Self, String> {
        Ok(Self {
            text: TextScorer::new(&Lexicon::default())?,
            face: FaceScorer::default(),
            jitter,
        })
    }

    pub fn analyze_text(&mut self, text: &str) -> AnalysisResult {
        let scores = self.text.score(text, &mut self.jitter);
        let classification = classify(&scores, ConfidenceRule::ShareOfTotal);
        let emotion_breakdown = self.normalize_text(&scores);
        debug!(
            primary = %classification.primary,
            confidence = classification.confidence,
            total = scores.total(),
            "text analysis"
        );

        AnalysisResult {
            modality: Modality::Text,
            primary_emotion: classification.primary,
            confidence: classification.confidence,
            emotion_breakdown,
            suggestions: suggestions_for(classification.primary),
        }
    }

    pub fn analyze_face(&mut self, frame: &FrameSignal) -> AnalysisResult {
        let scores = self.face.score(frame, &mut self.jitter);
        let classification = classify(&scores, ConfidenceRule::WinningScore);
        let emotion_breakdown = Breakdown::new(
            scores
                .iter()
                .map(|(emotion, score)| (emotion, to_percent(score)))
                .collect(),
        );
        debug!(
            primary = %classification.primary,
            confidence = classification.confidence,
            "face analysis"
        );

        AnalysisResult {
            modality: Modality::Face,
            primary_emotion: classification.primary,
            confidence: classification.confidence,
            emotion_breakdown,
            suggestions: Vec::new(),
        }
    }

    fn normalize_text(&mut self, scores: &ScoreMap) -> Breakdown {
        let max = scores.max();
        let entries = scores
            .iter()
            .map(|(emotion, score)| {
                let value = if max > 0.0 {
                    score / max * 100.0
                } else {
                    self.jitter.sample(0.0, EMPTY_BREAKDOWN_CEILING)
                };
                (emotion, to_percent(value))
            })
            .collect();
        Breakdown::new(entries)
    }
}

fn to_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
