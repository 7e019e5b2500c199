use chrono::NaiveDate;
use emotion_sense::export::{export_csv, export_file_name, CSV_HEADER};
use emotion_sense::history::{HistoryLog, MemoryBlobStore};
use emotion_sense::{HistoryEntry, Modality};

fn entry(kind: Modality, emotion: &str, confidence: u8, content: &str) -> HistoryEntry {
    HistoryEntry {
        id: 1,
        kind,
        emotion: emotion.to_string(),
        confidence,
        content: content.to_string(),
        timestamp: "2024-03-09T10:00:00.000Z".to_string(),
        date: "3/9/2024".to_string(),
    }
}

#[test]
fn empty_log_has_nothing_to_export() {
    assert_eq!(export_csv(&[]), None);
}

#[test]
fn rows_quote_content_and_format_confidence() {
    let entries = vec![
        entry(Modality::Text, "happy", 88, "she said \"wow\", twice"),
        entry(Modality::Face, "surprised", 41, ""),
    ];

    let csv = export_csv(&entries).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[1], "3/9/2024,text,happy,88%,\"she said \"\"wow\"\", twice\"");
    assert_eq!(lines[2], "3/9/2024,face,surprised,41%,\"\"");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn export_follows_log_order() {
    let mut log = HistoryLog::new(MemoryBlobStore::new());
    log.append(Modality::Text, "sad", 70, "first").expect("append");
    log.append(Modality::Text, "angry", 80, "second").expect("append");

    let csv = export_csv(&log.read_all()).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();

    assert!(lines[1].ends_with(",text,angry,80%,\"second\""));
    assert!(lines[2].ends_with(",text,sad,70%,\"first\""));
}

#[test]
fn file_name_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");

    assert_eq!(export_file_name(date), "emotion-analysis-2024-03-09.csv");
}
