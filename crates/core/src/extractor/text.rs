use super::{Extraction, Extractor};
use std::fs;
use std::path::Path;

/// Whole file as a single unit, decoded with a sniffed encoding.
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn format(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".txt"]
    }

    fn is_available(&self) -> bool {
        true
    }

    fn extract(&self, path: &Path) -> Extraction {
        let mut out = Extraction::empty();
        match fs::read(path) {
            Ok(raw) => out.push_text(decode(&raw)),
            Err(e) => out.push_skipped(0, e),
        }
        out
    }
}

/// Decodes bytes, dropping anything that does not decode.
#[cfg(feature = "encoding")]
pub(crate) fn decode(raw: &[u8]) -> String {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(raw, true);
    let encoding = detector.guess(None, true);
    let (text, used, had_errors) = encoding.decode(raw);
    tracing::debug!(encoding = used.name(), had_errors, "decoded text file");
    if had_errors {
        text.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect()
    } else {
        text.into_owned()
    }
}

#[cfg(not(feature = "encoding"))]
pub(crate) fn decode(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode("Payment ₹500 due".as_bytes()), "Payment ₹500 due");
    }

    #[cfg(feature = "encoding")]
    #[test]
    fn utf8_bom_is_stripped() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice(b"Circular 12");
        assert_eq!(decode(&raw), "Circular 12");
    }

    #[test]
    fn undecodable_bytes_never_panic() {
        let raw = [b'o', b'k', 0xFF, 0xFE, 0x00, b'!'];
        let text = decode(&raw);
        assert!(!text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[cfg(feature = "encoding")]
    #[test]
    fn legacy_single_byte_text_is_recovered() {
        // "café menu" in windows-1252
        let raw = b"caf\xe9 menu for the station canteen";
        assert!(decode(raw).starts_with("café"));
    }

    #[test]
    fn missing_file_is_a_skipped_unit() {
        let out = PlainTextExtractor.extract(Path::new("/no/such/file.txt"));
        assert_eq!(out.text(), "");
        assert_eq!(out.skipped(), 1);
    }
}
