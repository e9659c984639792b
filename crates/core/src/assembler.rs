use crate::error::{CoreError, Result};
use crate::fingerprint::sha256_file;
use crate::models::DocumentSummary;
use chrono::{DateTime, SubsecRound, Utc};
use std::path::{Path, PathBuf};

/// Provenance of an input file, established before any parsing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub content_hash: String,
}

impl SourceFile {
    /// Resolves the path and hashes the bytes. Fails only when the file
    /// cannot be read at all.
    pub fn open(path: &Path) -> Result<Self> {
        let content_hash = sha256_file(path)?;
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| CoreError::io(path, e))?
                .join(path)
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path,
            file_name,
            content_hash,
        })
    }
}

/// Derived fields of one cleaned document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextAnalysis {
    pub language: String,
    pub sentences: Vec<String>,
    pub summary_sentences: Vec<String>,
    pub action_items: Vec<String>,
    pub tags: Vec<String>,
    pub detected_dates: Vec<String>,
    pub detected_amounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    Summarized(DocumentSummary),
    /// The file was readable but yielded no text.
    NotProcessed { path: PathBuf },
}

impl ProcessOutcome {
    pub fn summary(&self) -> Option<&DocumentSummary> {
        match self {
            ProcessOutcome::Summarized(s) => Some(s),
            ProcessOutcome::NotProcessed { .. } => None,
        }
    }

    pub fn into_summary(self) -> Option<DocumentSummary> {
        match self {
            ProcessOutcome::Summarized(s) => Some(s),
            ProcessOutcome::NotProcessed { .. } => None,
        }
    }
}

/// The only place a `DocumentSummary` is built. `observed_at` is cut to
/// microseconds, the precision of the tabular log.
pub fn assemble(
    source: SourceFile,
    text: &str,
    analysis: TextAnalysis,
    title_max_chars: usize,
    observed_at: DateTime<Utc>,
) -> ProcessOutcome {
    if text.trim().is_empty() {
        return ProcessOutcome::NotProcessed { path: source.path };
    }
    let title = analysis
        .sentences
        .first()
        .map(|s| s.chars().take(title_max_chars).collect())
        .unwrap_or_else(|| source.file_name.clone());

    ProcessOutcome::Summarized(DocumentSummary {
        source_path: source.path.to_string_lossy().into_owned(),
        file_name: source.file_name,
        content_hash: source.content_hash,
        language: analysis.language,
        title,
        summary_sentences: analysis.summary_sentences,
        action_items: analysis.action_items,
        tags: analysis.tags,
        detected_dates: analysis.detected_dates,
        detected_amounts: analysis.detected_amounts,
        observed_at: observed_at.trunc_subsecs(6),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn source() -> SourceFile {
        SourceFile {
            path: PathBuf::from("/in/report.txt"),
            file_name: "report.txt".to_string(),
            content_hash: "feed".to_string(),
        }
    }

    #[test]
    fn empty_text_is_not_processed() {
        let out = assemble(source(), "  \n", TextAnalysis::default(), 140, Utc::now());
        assert_eq!(
            out,
            ProcessOutcome::NotProcessed {
                path: PathBuf::from("/in/report.txt")
            }
        );
        assert!(out.summary().is_none());
    }

    #[test]
    fn title_is_truncated_first_sentence() {
        let analysis = TextAnalysis {
            sentences: vec!["x".repeat(200), "second".to_string()],
            tags: vec!["General".to_string()],
            ..TextAnalysis::default()
        };
        let summary = assemble(source(), "text", analysis, 140, Utc::now())
            .into_summary()
            .unwrap();
        assert_eq!(summary.title.chars().count(), 140);
        assert_eq!(summary.content_hash, "feed");
    }

    #[test]
    fn title_falls_back_to_file_name() {
        let summary = assemble(source(), "text", TextAnalysis::default(), 140, Utc::now())
            .into_summary()
            .unwrap();
        assert_eq!(summary.title, "report.txt");
    }

    #[test]
    fn timestamp_survives_csv_and_json_unchanged() {
        use chrono::TimeZone;

        let observed_at = Utc
            .with_ymd_and_hms(2025, 9, 28, 6, 30, 44)
            .unwrap()
            .with_nanosecond(467_223_400)
            .unwrap();
        let analysis = TextAnalysis {
            sentences: vec!["Only one.".to_string()],
            summary_sentences: vec!["Only one.".to_string()],
            tags: vec!["General".to_string()],
            ..TextAnalysis::default()
        };
        let summary = assemble(source(), "Only one.", analysis, 140, observed_at)
            .into_summary()
            .unwrap();
        assert_eq!(summary.observed_at.nanosecond(), 467_223_000);

        let from_row = DocumentSummary::from_csv_row(&summary.to_csv_row()).unwrap();
        assert_eq!(from_row, summary);
        let json = serde_json::to_string(&summary).unwrap();
        let from_json: DocumentSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, summary);
        assert_eq!(from_json, from_row);
    }

    #[test]
    fn open_resolves_relative_paths_and_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "abc").unwrap();
        let src = SourceFile::open(&path).unwrap();
        assert!(src.path.is_absolute());
        assert_eq!(src.file_name, "a.txt");
        assert_eq!(
            src.content_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
