//! Regex-driven detection of dates, currency amounts and action items.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const MAX_ACTION_ITEMS: usize = 10;

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 2025-09-28
        r"\b\d{4}-\d{2}-\d{2}\b",
        // 28/09/2025
        r"\b\d{2}/\d{2}/\d{4}\b",
        // 28-09-25, 28-9-2025
        r"\b\d{1,2}-\d{1,2}-\d{2,4}\b",
        // Sep 28, 2025 / September 28, 2025
        r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[a-z]*\s+\d{1,2},\s+\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// `₹` is not a word character, so it carries no leading word boundary.
static AMOUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"(?i)(?:\bINR|\bRs\.?|₹)\s*\d[\d,]*(?:\.\d+)?\b").unwrap()]
});

pub fn date_patterns() -> &'static [Regex] {
    &DATE_PATTERNS
}

pub fn amount_patterns() -> &'static [Regex] {
    &AMOUNT_PATTERNS
}

/// All matches of every pattern, pattern by pattern, deduplicated in first-seen order.
///
/// Overlapping matches from different patterns are kept if their text differs.
pub fn find_patterns(text: &str, patterns: &[Regex]) -> Vec<String> {
    let found = patterns
        .iter()
        .flat_map(|p| p.find_iter(text).map(|m| m.as_str().to_string()));
    dedup_preserving_order(found)
}

pub fn find_dates(text: &str) -> Vec<String> {
    find_patterns(text, date_patterns())
}

pub fn find_amounts(text: &str) -> Vec<String> {
    find_patterns(text, amount_patterns())
}

/// Lines containing an obligation clue, followed by lines mentioning one of
/// `dates` that were not already picked. Capped at ten.
pub fn extract_action_items(text: &str, clues: &[String], dates: &[String]) -> Vec<String> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let clue_lines = lines.iter().filter(|line| {
        let lowered = line.to_lowercase();
        clues.iter().any(|c| lowered.contains(c.as_str()))
    });
    let dated_lines = lines
        .iter()
        .filter(|line| dates.iter().any(|d| line.contains(d.as_str())));

    let mut items = dedup_preserving_order(clue_lines.chain(dated_lines).map(|l| l.to_string()));
    items.truncate(MAX_ACTION_ITEMS);
    items
}

fn dedup_preserving_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
