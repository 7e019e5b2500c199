use emotion_sense::config::HistoryConfig;
use emotion_sense::history::{
    compute_stats, BlobStore, FileBlobStore, HistoryLog, MemoryBlobStore, DEFAULT_KEY,
};
use emotion_sense::{Analyzer, Modality, NoJitter};

fn memory_log() -> HistoryLog<MemoryBlobStore> {
    HistoryLog::new(MemoryBlobStore::new())
}

#[test]
fn empty_store_reads_as_empty_log() {
    let log = memory_log();

    assert!(log.read_all().is_empty());
    assert_eq!(log.stats().total_analyses, 0);
    assert_eq!(log.stats().happy_detections, 0);
}

#[test]
fn appended_entry_reads_back_first_and_unchanged() {
    let mut log = memory_log();
    log.append(Modality::Face, "neutral", 40, "").expect("append");
    let entry = log
        .append(Modality::Text, "happy", 88, "what a \"great\" day")
        .expect("append");

    let entries = log.read_all();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entry);
    assert_eq!(entries[0].kind, Modality::Text);
    assert_eq!(entries[0].content, "what a \"great\" day");
    assert_eq!(entries[1].kind, Modality::Face);
    assert!(entries[1].content.is_empty());
}

#[test]
fn log_keeps_newest_hundred() {
    let mut log = memory_log();
    let mut ids = Vec::new();
    for idx in 0..105 {
        let entry = log
            .append(Modality::Text, "sad", 60, &format!("entry {}", idx))
            .expect("append");
        ids.push(entry.id);
    }

    let entries = log.read_all();
    assert_eq!(entries.len(), 100);
    assert_eq!(entries[0].content, "entry 104");
    assert_eq!(entries[99].content, "entry 5");
    assert!(entries.iter().all(|entry| !ids[..5].contains(&entry.id)));
}

#[test]
fn ids_strictly_increase_even_within_one_millisecond() {
    let mut log = memory_log();
    let mut previous = None;
    for _ in 0..50 {
        let entry = log.append(Modality::Face, "happy", 70, "").expect("append");
        if let Some(previous) = previous {
            assert!(entry.id > previous);
        }
        previous = Some(entry.id);
    }
}

#[test]
fn timestamps_are_iso_instants() {
    let mut log = memory_log();
    let entry = log.append(Modality::Text, "fear", 65, "uneasy").expect("append");

    assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    assert!(entry.timestamp.ends_with('Z'));
    assert!(!entry.date.is_empty());
}

#[test]
fn stats_match_happy_and_joy_substrings() {
    let mut log = memory_log();
    for emotion in ["Happy", "joyful", "sad", "JOY ride"] {
        log.append(Modality::Text, emotion, 75, "").expect("append");
    }

    let stats = log.stats();
    assert_eq!(stats.total_analyses, 4);
    assert_eq!(stats.happy_detections, 3);
    assert_eq!(compute_stats(&log.read_all()), stats);
}

#[test]
fn corrupt_history_reads_empty_and_is_replaced() {
    let mut store = MemoryBlobStore::new();
    store.write(DEFAULT_KEY, "{not json").expect("write");
    let mut log = HistoryLog::new(store);

    assert!(log.read_all().is_empty());

    log.append(Modality::Text, "angry", 80, "livid").expect("append");
    let entries = log.read_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].emotion, "angry");
}

#[test]
fn blank_history_reads_empty() {
    let mut store = MemoryBlobStore::new();
    store.write(DEFAULT_KEY, "   ").expect("write");

    assert!(HistoryLog::new(store).read_all().is_empty());
}

#[test]
fn persisted_shape_uses_type_field() {
    let mut log = memory_log();
    log.append(Modality::Face, "surprised", 42, "").expect("append");

    let raw = log
        .store()
        .read(DEFAULT_KEY)
        .expect("read")
        .expect("history present");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let first = &value[0];
    assert_eq!(first["type"], "face");
    assert_eq!(first["emotion"], "surprised");
    assert_eq!(first["confidence"], 42);
    assert_eq!(first["content"], "");
    for field in ["id", "timestamp", "date"] {
        assert!(first.get(field).is_some(), "missing {}", field);
    }
}

#[test]
fn record_uses_analysis_fields() {
    let mut analyzer = Analyzer::new(NoJitter).expect("analyzer");
    let result = analyzer.analyze_text("I am furious");
    let mut log = memory_log();

    let entry = log.record(&result, "I am furious").expect("record");

    assert_eq!(entry.kind, Modality::Text);
    assert_eq!(entry.emotion, "angry");
    assert_eq!(entry.confidence, result.confidence);
    assert_eq!(entry.content, "I am furious");
}

#[test]
fn configured_capacity_and_key_are_respected() {
    let config = HistoryConfig {
        key: "custom".to_string(),
        capacity: 3,
        ..HistoryConfig::default()
    };
    let mut log = HistoryLog::with_config(MemoryBlobStore::new(), &config);
    for _ in 0..5 {
        log.append(Modality::Face, "neutral", 30, "").expect("append");
    }

    assert_eq!(log.read_all().len(), 3);
    assert!(log.store().read(DEFAULT_KEY).expect("read").is_none());
    assert!(log.store().read("custom").expect("read").is_some());
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("nested").join("history");

    let mut log = HistoryLog::new(FileBlobStore::new(root.clone()));
    let entry = log.append(Modality::Text, "happy", 90, "great").expect("append");

    let reopened = HistoryLog::new(FileBlobStore::new(root.clone()));
    assert_eq!(reopened.read_all(), vec![entry]);
    assert!(root.join("emotionHistory.json").exists());
    assert!(!root.join("emotionHistory.json.tmp").exists());
}

#[test]
fn file_store_missing_file_is_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path());

    assert_eq!(store.read(DEFAULT_KEY).expect("read"), None);
}
