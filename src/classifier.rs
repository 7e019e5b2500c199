use crate::scoring::ScoreMap;
use crate::Emotion;

pub const TEXT_CONFIDENCE_FLOOR: u8 = 60;
pub const TEXT_CONFIDENCE_CEILING: u8 = 95;
pub const TEXT_CONFIDENCE_DEFAULT: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceRule {
    ShareOfTotal,
    WinningScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub primary: Emotion,
    pub confidence: u8,
}

/// Highest-scoring label; ties keep the earliest label in iteration order.
pub fn primary_emotion(scores: &ScoreMap) -> Option<(Emotion, f64)> {
    let mut best: Option<(Emotion, f64)> = None;
    for (emotion, score) in scores.iter() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ if score.is_nan() => {}
            _ => best = Some((emotion, score)),
        }
    }
    best
}

pub fn classify(scores: &ScoreMap, rule: ConfidenceRule) -> Classification {
    let (primary, winning) = primary_emotion(scores).unwrap_or((Emotion::Neutral, 0.0));
    let confidence = match rule {
        ConfidenceRule::ShareOfTotal => share_confidence(winning, scores.total()),
        ConfidenceRule::WinningScore => winning.round().clamp(0.0, 100.0) as u8,
    };
    Classification {
        primary,
        confidence,
    }
}

fn share_confidence(winning: f64, total: f64) -> u8 {
    if total <= 0.0 || total.is_nan() {
        return TEXT_CONFIDENCE_DEFAULT;
    }
    (winning / total * 100.0)
        .round()
        .clamp(TEXT_CONFIDENCE_FLOOR as f64, TEXT_CONFIDENCE_CEILING as f64) as u8
}
