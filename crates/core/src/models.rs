use crate::tagger::DEFAULT_TAG;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const SUMMARY_DELIMITER: &str = " • ";
pub const ACTION_DELIMITER: &str = " | ";
pub const LIST_DELIMITER: &str = "; ";

pub const CSV_HEADER: [&str; 11] = [
    "source_path",
    "file_name",
    "content_hash",
    "language",
    "title",
    "summary",
    "action_items",
    "tags",
    "detected_dates",
    "detected_amounts",
    "observed_at",
];

/// Analysis result for one file.
///
/// Records are built by `assembler::assemble` and never edited afterwards;
/// persistence only appends new records. Fields are public for reading and
/// for rebuilding stored rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub source_path: String,
    pub file_name: String,
    /// Hex SHA-256 of the raw file bytes.
    pub content_hash: String,
    pub language: String,
    pub title: String,
    pub summary_sentences: Vec<String>,
    pub action_items: Vec<String>,
    pub tags: Vec<String>,
    pub detected_dates: Vec<String>,
    pub detected_amounts: Vec<String>,
    pub observed_at: DateTime<Utc>,
}

impl DocumentSummary {
    pub fn csv_header() -> &'static [&'static str] {
        &CSV_HEADER
    }

    pub fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.source_path.clone(),
            self.file_name.clone(),
            self.content_hash.clone(),
            self.language.clone(),
            self.title.clone(),
            self.summary_sentences.join(SUMMARY_DELIMITER),
            self.action_items.join(ACTION_DELIMITER),
            self.tags.join(LIST_DELIMITER),
            self.detected_dates.join(LIST_DELIMITER),
            self.detected_amounts.join(LIST_DELIMITER),
            self.observed_at_string(),
        ]
    }

    /// Rebuilds a record from a row in `CSV_HEADER` order. Joined fields are
    /// split back on their delimiters, so items that contained a delimiter do
    /// not survive the trip intact.
    pub fn from_csv_row(row: &[String]) -> Option<Self> {
        if row.len() != CSV_HEADER.len() {
            return None;
        }
        let observed_at = DateTime::parse_from_rfc3339(&row[10])
            .ok()?
            .with_timezone(&Utc);
        let mut tags = split_joined(&row[7], LIST_DELIMITER);
        if tags.is_empty() {
            tags.push(DEFAULT_TAG.to_string());
        }
        Some(Self {
            source_path: row[0].clone(),
            file_name: row[1].clone(),
            content_hash: row[2].clone(),
            language: row[3].clone(),
            title: row[4].clone(),
            summary_sentences: split_joined(&row[5], SUMMARY_DELIMITER),
            action_items: split_joined(&row[6], ACTION_DELIMITER),
            tags,
            detected_dates: split_joined(&row[8], LIST_DELIMITER),
            detected_amounts: split_joined(&row[9], LIST_DELIMITER),
            observed_at,
        })
    }

    pub fn observed_at_string(&self) -> String {
        self.observed_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

fn split_joined(value: &str, delimiter: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(delimiter).map(str::to_string).collect()
}
