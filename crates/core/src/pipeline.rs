//! Single-document analysis and the sequential batch driver.

use crate::assembler::{assemble, ProcessOutcome, SourceFile, TextAnalysis};
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::extractor::ExtractorRegistry;
use crate::language::detect_language;
use crate::models::DocumentSummary;
use crate::normalize::clean_text;
use crate::patterns::{extract_action_items, find_amounts, find_dates};
use crate::segment::split_sentences;
use crate::summarizer::{summarize, SummaryParams};
use crate::tables::AnalysisTables;
use crate::tagger::tag_text;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Analyzer {
    registry: ExtractorRegistry,
    tables: AnalysisTables,
    settings: SummaryConfig,
}

impl Analyzer {
    pub fn new(settings: SummaryConfig, tables: AnalysisTables) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            registry: ExtractorRegistry::default(),
            tables,
            settings,
        })
    }

    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings(&self) -> &SummaryConfig {
        &self.settings
    }

    pub fn tables(&self) -> &AnalysisTables {
        &self.tables
    }

    /// Analyzes one file. `Err` only when the file cannot be read; a file
    /// without extractable text is `NotProcessed`.
    pub fn process(&self, path: &Path) -> Result<ProcessOutcome> {
        let source = SourceFile::open(path)?;
        let extraction = self.registry.extract(path);
        if extraction.skipped() > 0 {
            debug!(?path, skipped = extraction.skipped(), "partial extraction");
        }
        let text = clean_text(&extraction.text());
        if text.is_empty() {
            return Ok(ProcessOutcome::NotProcessed { path: source.path });
        }
        let analysis = self.analyze_text(&text);
        Ok(assemble(
            source,
            &text,
            analysis,
            self.settings.title_max_chars,
            Utc::now(),
        ))
    }

    /// Runs every text stage over already-cleaned text.
    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let language = detect_language(text, self.settings.language_sample_chars);
        let sentences = split_sentences(text);
        let summary_sentences = summarize(
            text,
            SummaryParams {
                max_sentences: self.settings.max_sentences,
                score_exponent: self.settings.score_exponent,
            },
            self.tables.stop_words.for_language(&language),
        );
        let detected_dates = find_dates(text);
        let action_items = extract_action_items(text, &self.tables.action_clues, &detected_dates);
        let tags = tag_text(text, &self.tables.tag_rules);
        let detected_amounts = find_amounts(text);

        TextAnalysis {
            language,
            sentences,
            summary_sentences,
            action_items,
            tags,
            detected_dates,
            detected_amounts,
        }
    }
}

/// One-shot analysis with the built-in tables and default settings apart
/// from the sentence limit.
pub fn summarize_file(path: &Path, max_sentences: usize) -> Result<ProcessOutcome> {
    let settings = SummaryConfig {
        max_sentences,
        ..SummaryConfig::default()
    };
    Analyzer::new(settings, AnalysisTables::default())?.process(path)
}

/// Receives each finished record, e.g. to persist it.
pub trait SummarySink {
    fn accept(&mut self, summary: &DocumentSummary) -> anyhow::Result<()>;
}

impl SummarySink for Vec<DocumentSummary> {
    fn accept(&mut self, summary: &DocumentSummary) -> anyhow::Result<()> {
        self.push(summary.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub discovered: usize,
    pub processed: usize,
    pub not_processed: usize,
    pub failed: usize,
    pub failures: Vec<PathBuf>,
}

/// Processes `files` one after another. A failing file is logged and
/// counted; the rest of the batch still runs.
pub fn run_batch(
    analyzer: &Analyzer,
    files: &[PathBuf],
    sink: &mut dyn SummarySink,
) -> BatchSummary {
    let mut summary = BatchSummary {
        discovered: files.len(),
        ..BatchSummary::default()
    };
    info!("Processing {} document(s)...", files.len());

    for (i, path) in files.iter().enumerate() {
        debug!(?path, "[{}/{}]", i + 1, files.len());
        let result = analyzer
            .process(path)
            .map_err(anyhow::Error::from)
            .and_then(|outcome| match outcome {
                ProcessOutcome::Summarized(doc) => sink.accept(&doc).map(|_| true),
                ProcessOutcome::NotProcessed { .. } => Ok(false),
            });
        match result {
            Ok(true) => summary.processed += 1,
            Ok(false) => {
                debug!(?path, "no text extracted");
                summary.not_processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {:#}", path, e);
                summary.failed += 1;
                summary.failures.push(path.clone());
            }
        }
    }

    info!(
        "Batch complete: {} processed, {} without text, {} failed.",
        summary.processed, summary.not_processed, summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn analyzer(max_sentences: usize) -> Analyzer {
        let settings = SummaryConfig {
            max_sentences,
            ..SummaryConfig::default()
        };
        Analyzer::new(settings, AnalysisTables::default()).unwrap()
    }

    #[test]
    fn invoice_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.txt");
        fs::write(
            &path,
            "Invoice INR 4,500 due by 2025-09-28. Please submit payment.",
        )
        .unwrap();

        let doc = analyzer(5).process(&path).unwrap().into_summary().unwrap();
        assert_eq!(doc.detected_amounts, vec!["INR 4,500"]);
        assert_eq!(doc.detected_dates, vec!["2025-09-28"]);
        assert_eq!(
            doc.action_items,
            vec!["Invoice INR 4,500 due by 2025-09-28. Please submit payment."]
        );
        assert!(doc.tags.contains(&"Procurement/Finance".to_string()));
        assert_eq!(doc.title, "Invoice INR 4,500 due by 2025-09-28.");
        assert_eq!(doc.file_name, "invoice.txt");
    }

    #[test]
    fn empty_file_is_not_processed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        let outcome = analyzer(5).process(&path).unwrap();
        assert!(matches!(outcome, ProcessOutcome::NotProcessed { .. }));
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        assert!(analyzer(5).process(Path::new("/no/such/dir/x.txt")).is_err());
    }

    #[test]
    fn short_document_summary_is_every_sentence() {
        let a = analyzer(5);
        let text = "The depot opened. Trains were cleaned! Was the brake checked?";
        let analysis = a.analyze_text(text);
        assert_eq!(analysis.summary_sentences, split_sentences(text));
        assert_eq!(analysis.summary_sentences.len(), 3);
    }

    #[test]
    fn plain_text_is_tagged_general() {
        let analysis = analyzer(5).analyze_text("Lorem ipsum dolor amet.");
        assert_eq!(analysis.tags, vec!["General"]);
        assert!(analysis.action_items.is_empty());
    }

    #[test]
    fn renamed_copy_keeps_the_hash() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "Tender notice for coaches.").unwrap();
        fs::copy(&a, &b).unwrap();
        let first = summarize_file(&a, 3).unwrap().into_summary().unwrap();
        let second = summarize_file(&b, 3).unwrap().into_summary().unwrap();
        assert_eq!(first.content_hash, second.content_hash);
        assert_ne!(first.file_name, second.file_name);
    }

    #[test]
    fn zero_sentences_rejected_at_construction() {
        let settings = SummaryConfig {
            max_sentences: 0,
            ..SummaryConfig::default()
        };
        assert!(Analyzer::new(settings, AnalysisTables::default()).is_err());
    }

    #[test]
    fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let empty = dir.path().join("empty.txt");
        let missing = dir.path().join("missing.txt");
        fs::write(&good, "Station controller must file the roster.").unwrap();
        fs::write(&empty, "").unwrap();

        let mut sink: Vec<DocumentSummary> = Vec::new();
        let files = vec![missing.clone(), empty, good];
        let summary = run_batch(&analyzer(5), &files, &mut sink);

        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.not_processed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures, vec![missing]);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].file_name, "good.txt");
    }
}
