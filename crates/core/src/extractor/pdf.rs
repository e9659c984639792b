use super::{Extraction, Extractor};
use std::path::Path;

/// One unit per page.
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".pdf"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "pdf")
    }

    fn extract(&self, path: &Path) -> Extraction {
        pdf_pages(path)
    }
}

#[cfg(feature = "pdf")]
fn pdf_pages(path: &Path) -> Extraction {
    let mut out = Extraction::empty();
    let doc = match lopdf::Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            out.push_skipped(0, format!("cannot open pdf: {e}"));
            return out;
        }
    };
    for (index, page_number) in doc.get_pages().keys().enumerate() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => out.push_text(text),
            Err(e) => out.push_skipped(index, e),
        }
    }
    out
}

#[cfg(not(feature = "pdf"))]
fn pdf_pages(_path: &Path) -> Extraction {
    Extraction::empty()
}

#[cfg(all(test, feature = "pdf"))]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn corrupt_pdf_yields_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\nthis is not a real pdf body").unwrap();
        let out = PdfExtractor.extract(&path);
        assert_eq!(out.text(), "");
        assert_eq!(out.skipped(), 1);
    }
}
