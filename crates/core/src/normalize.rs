use once_cell::sync::Lazy;
use regex::Regex;

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r").unwrap());
static HORIZONTAL_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \u{00A0}]+").unwrap());

/// Collapses line endings to `\n`, tabs and space runs to a single space, and trims.
pub fn clean_text(text: &str) -> String {
    let text = LINE_ENDINGS.replace_all(text, "\n");
    let text = text.replace('\t', " ");
    let text = HORIZONTAL_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}
