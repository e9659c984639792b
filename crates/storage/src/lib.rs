//! Storage layer: append-only summary log, per-tag route streams and
//! per-document snapshots, all under one output directory.
//!
//! Records are only ever appended; nothing here rewrites an existing row.

pub mod search;

use anyhow::Context;
use docsum_core::pipeline::SummarySink;
use docsum_core::DocumentSummary;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use search::{Facets, SearchFilter};

pub const LOG_FILE_NAME: &str = "summary.csv";

pub struct OutputStore {
    dir: PathBuf,
    per_file_json: bool,
}

impl OutputStore {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create output directory {:?}", dir))?;
        Ok(Self {
            dir,
            per_file_json: false,
        })
    }

    pub fn with_per_file_json(mut self, enabled: bool) -> Self {
        self.per_file_json = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    pub fn route_path(&self, tag: &str) -> PathBuf {
        self.dir
            .join(format!("route_{}.jsonl", sanitize_file_name(tag)))
    }

    pub fn snapshot_path(&self, file_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", sanitize_file_name(file_name)))
    }

    /// Appends the record to the log and to each of its tag routes, and
    /// writes the snapshot when enabled.
    pub fn append(&self, summary: &DocumentSummary) -> anyhow::Result<()> {
        self.append_log(summary)?;
        let line = serde_json::to_string(summary)?;
        for tag in &summary.tags {
            let path = self.route_path(tag);
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open route {:?}", path))?;
            writeln!(file, "{line}").with_context(|| format!("write route {:?}", path))?;
        }
        if self.per_file_json {
            self.write_snapshot(summary)?;
        }
        Ok(())
    }

    fn append_log(&self, summary: &DocumentSummary) -> anyhow::Result<()> {
        let path = self.log_path();
        let is_new = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open summary log {:?}", path))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(DocumentSummary::csv_header())?;
        }
        writer.write_record(summary.to_csv_row())?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_snapshot(&self, summary: &DocumentSummary) -> anyhow::Result<()> {
        let path = self.snapshot_path(&summary.file_name);
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json).with_context(|| format!("write snapshot {:?}", path))?;
        Ok(())
    }

    /// Every logged record, newest first. Rows that cannot be parsed are skipped.
    pub fn read_log(&self) -> anyhow::Result<Vec<DocumentSummary>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("open summary log {:?}", path))?;
        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping unreadable log row {}: {}", line + 2, e);
                    continue;
                }
            };
            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            match DocumentSummary::from_csv_row(&fields) {
                Some(summary) => rows.push(summary),
                None => warn!("skipping malformed log row {}", line + 2),
            }
        }
        rows.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        Ok(rows)
    }

    /// Full record for a content hash: the snapshot when it belongs to the
    /// same content, otherwise the record rebuilt from its log row.
    pub fn find_by_hash(&self, content_hash: &str) -> anyhow::Result<Option<DocumentSummary>> {
        let Some(row) = self
            .read_log()?
            .into_iter()
            .find(|r| r.content_hash == content_hash)
        else {
            return Ok(None);
        };
        let snapshot = self.snapshot_path(&row.file_name);
        if snapshot.exists() {
            let content = fs::read_to_string(&snapshot)
                .with_context(|| format!("read snapshot {:?}", snapshot))?;
            match serde_json::from_str::<DocumentSummary>(&content) {
                Ok(full) if full.content_hash == content_hash => return Ok(Some(full)),
                Ok(_) => {}
                Err(e) => warn!("ignoring unreadable snapshot {:?}: {}", snapshot, e),
            }
        }
        Ok(Some(row))
    }

    pub fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<DocumentSummary>> {
        Ok(self
            .read_log()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    pub fn facets(&self) -> anyhow::Result<Facets> {
        Ok(Facets::collect(&self.read_log()?))
    }
}

impl SummarySink for OutputStore {
    fn accept(&mut self, summary: &DocumentSummary) -> anyhow::Result<()> {
        self.append(summary)
    }
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
