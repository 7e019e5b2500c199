use emotion_sense::display::{color_for, emoji_for, title_case};
use emotion_sense::{format_percent, Emotion};

#[test]
fn emoji_lookup_matches_substrings() {
    assert_eq!(emoji_for("happy"), "😊");
    assert_eq!(emoji_for("Joyful"), "😄");
    assert_eq!(emoji_for(Emotion::Surprised.label()), "😲");
    assert_eq!(emoji_for("bored"), "😐");
}

#[test]
fn color_lookup_defaults_to_neutral() {
    assert_eq!(color_for("ANGRY"), "#e74c3c");
    assert_eq!(color_for("in love"), "#e91e63");
    assert_eq!(color_for(""), "#95a5a6");
}

#[test]
fn labels_title_case_for_display() {
    assert_eq!(title_case("surprised"), "Surprised");
    assert_eq!(title_case(""), "");
    assert_eq!(format_percent(87), "87%");
}

#[test]
fn labels_round_trip_through_strings() {
    for emotion in Emotion::TEXT_ORDER.iter().chain(Emotion::FACE_ORDER.iter()) {
        assert_eq!(Emotion::from_str(emotion.label()), Some(*emotion));
    }
    assert_eq!(Emotion::from_str("joy"), None);
}
