use super::{Extraction, Extractor};
use std::path::Path;

/// One unit per `w:p` paragraph of the main document part.
pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".docx"]
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "office")
    }

    fn extract(&self, path: &Path) -> Extraction {
        docx_paragraphs(path)
    }
}

#[cfg(feature = "office")]
fn docx_paragraphs(path: &Path) -> Extraction {
    use std::io::Read;

    let mut out = Extraction::empty();
    let xml = std::fs::File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|f| zip::ZipArchive::new(f).map_err(|e| e.to_string()))
        .and_then(|mut archive| {
            let mut part = archive
                .by_name("word/document.xml")
                .map_err(|e| e.to_string())?;
            let mut xml = String::new();
            part.read_to_string(&mut xml).map_err(|e| e.to_string())?;
            Ok(xml)
        });
    match xml {
        Ok(xml) => collect_paragraphs(&xml, &mut out),
        Err(reason) => out.push_skipped(0, format!("cannot open docx: {reason}")),
    }
    out
}

/// Walks WordprocessingML, emitting one unit per paragraph. A paragraph with
/// a bad text node is skipped; a structural XML error ends the walk with the
/// paragraphs read so far.
pub(crate) fn collect_paragraphs(xml: &str, out: &mut Extraction) {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    let mut index = 0usize;
    let mut current: Option<String> = None;
    let mut failure: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    current = Some(String::new());
                    failure = None;
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.name().as_ref(), current.as_mut()) {
                (b"w:tab", Some(para)) => para.push('\t'),
                (b"w:br", Some(para)) | (b"w:cr", Some(para)) => para.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                if let Some(para) = current.as_mut() {
                    match t.unescape() {
                        Ok(s) => para.push_str(&s),
                        Err(e) => failure = Some(e.to_string()),
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(para) = current.take() {
                        match failure.take() {
                            Some(reason) => out.push_skipped(index, reason),
                            None if !para.trim().is_empty() => out.push_text(para),
                            None => {}
                        }
                    }
                    index += 1;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                out.push_skipped(index, format!("malformed document xml: {e}"));
                break;
            }
            _ => {}
        }
    }
}

#[cfg(not(feature = "office"))]
fn docx_paragraphs(_path: &Path) -> Extraction {
    Extraction::empty()
}
