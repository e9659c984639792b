//! Core library: extraction, normalisation, summarisation, tagging and entity detection
//! for office documents.

pub mod assembler;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fingerprint;
pub mod language;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod scanner;
pub mod segment;
pub mod summarizer;
pub mod tables;
pub mod tagger;

pub use assembler::ProcessOutcome;
pub use error::CoreError;
pub use extractor::{is_supported, SUPPORTED_EXTENSIONS};
pub use models::DocumentSummary;
pub use pipeline::{run_batch, summarize_file, Analyzer, BatchSummary, SummarySink};
