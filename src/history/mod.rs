pub mod store;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::warn;

use crate::config::HistoryConfig;
use crate::{AnalysisResult, Modality};

pub use store::{BlobStore, FileBlobStore, MemoryBlobStore};

pub const DEFAULT_KEY: &str = "emotionHistory";
pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Modality,
    pub emotion: String,
    pub confidence: u8,
    #[serde(default)]
    pub content: String,
    pub timestamp: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_analyses: usize,
    pub happy_detections: usize,
}

pub struct HistoryLog<S> {
    store: S,
    key: String,
    capacity: usize,
    date_format: String,
}

impl<S: BlobStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_config(store: S, config: &HistoryConfig) -> Self {
        Self {
            store,
            key: config.key.clone(),
            capacity: config.capacity.max(1),
            date_format: config.date_format.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn append(
        &mut self,
        kind: Modality,
        emotion: &str,
        confidence: u8,
        content: &str,
    ) -> Result<HistoryEntry, String> {
        let mut entries = self.read_all();
        let now = Utc::now();
        let mut id = now.timestamp_millis();
        if let Some(newest) = entries.first() {
            if id <= newest.id {
                id = newest.id + 1;
            }
        }

        let entry = HistoryEntry {
            id,
            kind,
            emotion: emotion.to_string(),
            confidence: confidence.min(100),
            content: content.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            date: self.local_date(now),
        };

        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);
        self.persist(&entries)?;
        Ok(entry)
    }

    pub fn record(&mut self, result: &AnalysisResult, content: &str) -> Result<HistoryEntry, String> {
        self.append(
            result.modality,
            result.primary_emotion.label(),
            result.confidence,
            content,
        )
    }

    /// Never fails: missing or unreadable data reads as an empty log.
    pub fn read_all(&self) -> Vec<HistoryEntry> {
        let data = match self.store.read(&self.key) {
            Ok(Some(data)) => data,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, "history unavailable: {}", err);
                return Vec::new();
            }
        };
        if data.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.key, "unreadable history, the next append overwrites it: {}", err);
                Vec::new()
            }
        }
    }

    pub fn stats(&self) -> HistoryStats {
        compute_stats(&self.read_all())
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), String> {
        let payload = serde_json::to_string(entries)
            .map_err(|err| format!("failed to serialize history: {}", err))?;
        self.store.write(&self.key, &payload)
    }

    fn local_date(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&Local);
        let mut date = String::new();
        if write!(date, "{}", local.format(&self.date_format)).is_err() {
            date.clear();
            let _ = write!(date, "{}", local.format(DEFAULT_DATE_FORMAT));
        }
        date
    }
}

/// Happy detections match "happy" or "joy" anywhere in the label, ignoring
/// case, so "joyful" and "JOY ride" both count.
pub fn compute_stats(entries: &[HistoryEntry]) -> HistoryStats {
    let happy_detections = entries
        .iter()
        .filter(|entry| {
            let emotion = entry.emotion.to_lowercase();
            emotion.contains("happy") || emotion.contains("joy")
        })
        .count();
    HistoryStats {
        total_analyses: entries.len(),
        happy_detections,
    }
}
