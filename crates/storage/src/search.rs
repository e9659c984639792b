use docsum_core::DocumentSummary;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring over name, title, summary, actions, dates and amounts.
    pub query: Option<String>,
    /// Substring of the joined tag list.
    pub tag: Option<String>,
    /// Exact language code.
    pub language: Option<String>,
}

impl SearchFilter {
    pub fn matches(&self, doc: &DocumentSummary) -> bool {
        if let Some(tag) = non_blank(&self.tag) {
            if !doc.tags.join("; ").contains(tag) {
                return false;
            }
        }
        if let Some(lang) = non_blank(&self.language) {
            if doc.language != lang {
                return false;
            }
        }
        if let Some(query) = non_blank(&self.query) {
            let haystack = format!(
                "{} {} {} {} {} {}",
                doc.file_name,
                doc.title,
                doc.summary_sentences.join(" "),
                doc.action_items.join(" "),
                doc.detected_dates.join(" "),
                doc.detected_amounts.join(" "),
            )
            .to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub tags: Vec<String>,
    pub languages: Vec<String>,
}

impl Facets {
    pub fn collect(docs: &[DocumentSummary]) -> Self {
        let tags: BTreeSet<&str> = docs
            .iter()
            .flat_map(|d| d.tags.iter().map(String::as_str))
            .filter(|t| !t.is_empty())
            .collect();
        let languages: BTreeSet<&str> = docs
            .iter()
            .map(|d| d.language.as_str())
            .filter(|l| !l.is_empty())
            .collect();
        Self {
            tags: tags.into_iter().map(str::to_string).collect(),
            languages: languages.into_iter().map(str::to_string).collect(),
        }
    }
}
