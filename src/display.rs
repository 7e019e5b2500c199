const EMOJI: [(&str, &str); 12] = [
    ("happy", "😊"),
    ("joy", "😄"),
    ("sad", "😢"),
    ("angry", "😠"),
    ("fear", "😨"),
    ("surprise", "😲"),
    ("neutral", "😐"),
    ("disgust", "🤢"),
    ("excited", "🤩"),
    ("love", "😍"),
    ("frustrated", "😤"),
    ("worried", "😟"),
];

const COLORS: [(&str, &str); 12] = [
    ("happy", "#f39c12"),
    ("joy", "#f39c12"),
    ("sad", "#3498db"),
    ("angry", "#e74c3c"),
    ("fear", "#9b59b6"),
    ("surprise", "#f39c12"),
    ("neutral", "#95a5a6"),
    ("disgust", "#27ae60"),
    ("excited", "#e67e22"),
    ("love", "#e91e63"),
    ("frustrated", "#e74c3c"),
    ("worried", "#9b59b6"),
];

const DEFAULT_EMOJI: &str = "😐";
const DEFAULT_COLOR: &str = "#95a5a6";

pub fn emoji_for(label: &str) -> &'static str {
    lookup(&EMOJI, label).unwrap_or(DEFAULT_EMOJI)
}

pub fn color_for(label: &str) -> &'static str {
    lookup(&COLORS, label).unwrap_or(DEFAULT_COLOR)
}

pub fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lookup(table: &[(&'static str, &'static str)], label: &str) -> Option<&'static str> {
    let lowered = label.to_lowercase();
    table
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, value)| *value)
}
