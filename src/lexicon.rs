use regex::Regex;

use crate::Emotion;

const HAPPY_WORDS: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "great",
    "awesome",
    "wonderful",
    "amazing",
    "fantastic",
    "love",
    "perfect",
    "excellent",
    "brilliant",
    "delighted",
    "thrilled",
    "cheerful",
];

const SAD_WORDS: &[&str] = &[
    "sad",
    "depressed",
    "unhappy",
    "miserable",
    "disappointed",
    "heartbroken",
    "lonely",
    "melancholy",
    "gloomy",
    "sorrowful",
    "grief",
    "despair",
];

const ANGRY_WORDS: &[&str] = &[
    "angry",
    "mad",
    "furious",
    "annoyed",
    "irritated",
    "frustrated",
    "rage",
    "hate",
    "disgusted",
    "outraged",
    "livid",
    "enraged",
];

const FEAR_WORDS: &[&str] = &[
    "scared",
    "afraid",
    "terrified",
    "worried",
    "anxious",
    "nervous",
    "panic",
    "frightened",
    "concerned",
    "apprehensive",
    "uneasy",
];

const SURPRISE_WORDS: &[&str] = &[
    "surprised",
    "shocked",
    "amazed",
    "astonished",
    "stunned",
    "bewildered",
    "startled",
    "unexpected",
    "incredible",
    "unbelievable",
];

const NEUTRAL_WORDS: &[&str] = &[
    "okay", "fine", "normal", "regular", "usual", "standard", "typical", "ordinary", "average",
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<(Emotion, Vec<&'static str>)>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            entries: vec![
                (Emotion::Happy, HAPPY_WORDS.to_vec()),
                (Emotion::Sad, SAD_WORDS.to_vec()),
                (Emotion::Angry, ANGRY_WORDS.to_vec()),
                (Emotion::Fear, FEAR_WORDS.to_vec()),
                (Emotion::Surprise, SURPRISE_WORDS.to_vec()),
                (Emotion::Neutral, NEUTRAL_WORDS.to_vec()),
            ],
        }
    }
}

impl Lexicon {
    pub fn words(&self, emotion: Emotion) -> &[&'static str] {
        self.entries
            .iter()
            .find(|(label, _)| *label == emotion)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    pub fn labels(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn compile(&self) -> Result<Vec<KeywordPattern>, String> {
        self.entries
            .iter()
            .map(|(emotion, words)| KeywordPattern::new(*emotion, words))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct KeywordPattern {
    pub emotion: Emotion,
    regex: Regex,
}

impl KeywordPattern {
    fn new(emotion: Emotion, words: &[&str]) -> Result<Self, String> {
        let alternation = words
            .iter()
            .map(|word| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
            .map_err(|err| format!("invalid keyword pattern for {}: {}", emotion, err))?;
        Ok(Self { emotion, regex })
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}
