use chrono::NaiveDate;

use crate::history::HistoryEntry;

pub const CSV_HEADER: &str = "Date,Type,Emotion,Confidence,Content";

pub fn export_csv(entries: &[HistoryEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for entry in entries {
        lines.push(
            [
                entry.date.clone(),
                entry.kind.label().to_string(),
                entry.emotion.clone(),
                format!("{}%", entry.confidence),
                quote(&entry.content),
            ]
            .join(","),
        );
    }
    Some(lines.join("\n"))
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("emotion-analysis-{}.csv", date.format("%Y-%m-%d"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
