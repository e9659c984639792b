//! Format-specific text extraction behind a capability-checked registry.
//!
//! Extractors never fail: every page, paragraph or file they read is reported
//! as a [`UnitOutcome`], and a broken unit only removes its own text.

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use std::path::Path;
use tracing::debug;

/// Extensions the pipeline accepts, lower-case with the leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".txt"];

pub fn is_supported(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Lower-cased extension including the dot, e.g. `".pdf"`.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Text(String),
    Skipped { unit: usize, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub units: Vec<UnitOutcome>,
}

impl Extraction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.units.push(UnitOutcome::Text(text.into()));
    }

    pub fn push_skipped(&mut self, unit: usize, reason: impl ToString) {
        let reason = reason.to_string();
        debug!(unit, %reason, "extraction unit skipped");
        self.units.push(UnitOutcome::Skipped { unit, reason });
    }

    /// Joins the text of successful, non-blank units with newlines.
    pub fn text(&self) -> String {
        self.units
            .iter()
            .filter_map(|u| match u {
                UnitOutcome::Text(t) if !t.trim().is_empty() => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn skipped(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u, UnitOutcome::Skipped { .. }))
            .count()
    }
}

pub trait Extractor: Send + Sync {
    fn format(&self) -> &'static str;
    /// Lower-case extensions with the leading dot.
    fn extensions(&self) -> &'static [&'static str];
    /// Whether the backing parser was compiled in.
    fn is_available(&self) -> bool;
    fn extract(&self, path: &Path) -> Extraction;
}

pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
            .with(Box::new(PdfExtractor))
            .with(Box::new(DocxExtractor))
            .with(Box::new(PlainTextExtractor))
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Registers `extractor` if its capability is present; otherwise it is dropped.
    pub fn with(mut self, extractor: Box<dyn Extractor>) -> Self {
        if extractor.is_available() {
            self.extractors.push(extractor);
        } else {
            debug!(format = extractor.format(), "extractor unavailable, not registered");
        }
        self
    }

    pub fn for_extension(&self, ext: &str) -> Option<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext))
            .map(|e| e.as_ref())
    }

    pub fn formats(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.format()).collect()
    }

    /// Dispatches on the extension; unknown or unavailable formats yield nothing.
    pub fn extract(&self, path: &Path) -> Extraction {
        let Some(ext) = extension_of(path) else {
            return Extraction::empty();
        };
        match self.for_extension(&ext) {
            Some(extractor) => extractor.extract(path),
            None => {
                debug!(?path, %ext, "no extractor for extension");
                Extraction::empty()
            }
        }
    }
}
