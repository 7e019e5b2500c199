use crate::Emotion;

const HAPPY: [&str; 3] = [
    "Share your positive energy with others!",
    "Consider writing in a gratitude journal to maintain this mood.",
    "This is a great time to tackle challenging tasks.",
];

const SAD: [&str; 3] = [
    "It's okay to feel sad sometimes. Consider talking to someone you trust.",
    "Try engaging in activities that usually bring you joy.",
    "Remember that this feeling is temporary and will pass.",
];

const ANGRY: [&str; 3] = [
    "Take deep breaths and count to ten before responding.",
    "Consider physical exercise to help release tension.",
    "Try to identify the root cause of your anger.",
];

const FEAR: [&str; 3] = [
    "Break down your worries into smaller, manageable parts.",
    "Practice relaxation techniques like deep breathing.",
    "Consider talking to someone about your concerns.",
];

const SURPRISE: [&str; 3] = [
    "Take a moment to process this unexpected situation.",
    "Use this energy to explore new opportunities.",
    "Share your excitement with others if it's positive news.",
];

const NEUTRAL: [&str; 3] = [
    "This is a good time for reflection and planning.",
    "Consider setting new goals or trying something new.",
    "Neutral emotions can be a sign of inner balance.",
];

pub fn suggestions_for(emotion: Emotion) -> Vec<String> {
    let table = match emotion {
        Emotion::Happy => &HAPPY,
        Emotion::Sad => &SAD,
        Emotion::Angry => &ANGRY,
        Emotion::Fear => &FEAR,
        Emotion::Surprise => &SURPRISE,
        Emotion::Surprised | Emotion::Neutral => &NEUTRAL,
    };
    table.iter().map(|line| line.to_string()).collect()
}

pub fn suggestions_for_label(label: &str) -> Vec<String> {
    suggestions_for(Emotion::from_str(label).unwrap_or(Emotion::Neutral))
}
