//! Sentence segmentation and word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

// Terminal punctuation (Latin, Devanagari danda/double danda, Malayalam virama
// variants) followed by whitespace, or a run of newlines.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([.!?\u{0964}\u{0965}\u{0D3A}\u{0D3B}])\s+|\n+").unwrap()
});

static TOKEN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\u{00C0}-\u{1FFF}\u{2C00}-\u{D7FF}]+").unwrap());

/// Splits text into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for caps in SENTENCE_BREAK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        // Keep the terminal mark with the sentence it closes.
        let end = caps.get(1).map(|m| m.end()).unwrap_or(whole.start());
        push_fragment(&mut sentences, &text[start..end]);
        start = whole.end();
    }
    push_fragment(&mut sentences, &text[start..]);
    sentences
}

fn push_fragment(out: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Lower-cased word tokens; only used for scoring.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_SEPARATOR
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
