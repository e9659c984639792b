//! Word lists and keyword rules consumed by the summarizer, tagger and
//! action-item extraction. Loaded once, then shared by reference.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const LATIN_STOP_WORDS: &str = "a an and are as at be by for from has have he her hers him his i in is it its of on or our so that the their them they this to was were will with you your we us not no if but into over under across while when where which who whom whose why how than then too very can may shall must should would could there here also more most less least each per upon via among within without above below before after between during against further such only same own both any all few many much other some nor like just ever never always often sometimes else one two three four five six seven eight nine ten";

const SEED_STOP_WORDS: &[&str] = &[
    "ഒരു", "ഈ", "ആ", "എന്ന്", "അല്ല", "ഉണ്ട്", "അതായത്", "എന്നിവ", "വേണ്ടി", "കൊണ്ട്",
];

const DEFAULT_TAG_RULES: &[(&str, &[&str])] = &[
    (
        "Engineering/Rolling Stock",
        &[
            "rolling stock", "bogie", "traction", "pantograph", "brake", "maintenance", "schedule",
            "maximo", "job card", "depot", "workshop", "coach", "trainset", "ohe", "track",
        ],
    ),
    (
        "Procurement/Finance",
        &[
            "invoice", "po ", "purchase order", "vendor", "payment", "tender", "rfq", "gst", "grn",
            "bill",
        ],
    ),
    (
        "Safety",
        &[
            "safety", "crs", "commissioner of metro rail safety", "incident", "near miss", "ptw",
            "sop", "circular",
        ],
    ),
    (
        "HR/Training",
        &["hr", "leave", "attendance", "policy", "training", "refresher", "shift", "roster"],
    ),
    (
        "Legal/Compliance",
        &[
            "rti", "legal", "mohua", "compliance", "audit", "contract", "arbitration", "directive",
            "regulation",
        ],
    ),
    (
        "Environment",
        &["environment", "eia", "pollution", "esg", "sustainability", "waste", "noise"],
    ),
    (
        "Operations/Stations",
        &[
            "station", "controller", "operations", "timetable", "headway", "passenger", "ticket",
            "ridership",
        ],
    ),
    (
        "IT/Systems",
        &["sharepoint", "sap", "iot", "uns", "scada", "network", "server", "database"],
    ),
];

const DEFAULT_ACTION_CLUES: &[&str] = &[
    "must", "shall", "should", "required", "require", "submit", "approve", "approve by", "due",
    "deadline", "no later than", "not later than", "by ", "prior to", "immediately", "within ",
    "ensure",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagRule {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    latin: HashSet<String>,
    other: HashSet<String>,
}

impl StopWords {
    pub fn new<L, O>(latin: L, other: O) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            latin: latin.into_iter().map(Into::into).collect(),
            other: other.into_iter().map(Into::into).collect(),
        }
    }

    /// English-family codes use the latin list, everything else the seed list.
    pub fn for_language(&self, lang: &str) -> &HashSet<String> {
        if lang.starts_with("en") {
            &self.latin
        } else {
            &self.other
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisTables {
    pub stop_words: StopWords,
    pub tag_rules: Vec<TagRule>,
    pub action_clues: Vec<String>,
}

impl Default for AnalysisTables {
    fn default() -> Self {
        Self {
            stop_words: StopWords::new(
                LATIN_STOP_WORDS.split_whitespace(),
                SEED_STOP_WORDS.iter().copied(),
            ),
            tag_rules: DEFAULT_TAG_RULES
                .iter()
                .map(|(label, keywords)| TagRule {
                    label: label.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
            action_clues: DEFAULT_ACTION_CLUES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TablesFile {
    stop_words: Option<StopWordsFile>,
    #[serde(default)]
    tags: Vec<TagRule>,
    action_clues: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct StopWordsFile {
    latin: Option<Vec<String>>,
    other: Option<Vec<String>>,
}

impl AnalysisTables {
    /// Parses a TOML override. Sections absent from the document keep their defaults.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, CoreError> {
        let file: TablesFile = toml::from_str(content).map_err(|source| CoreError::Tables {
            path: origin.to_path_buf(),
            source,
        })?;
        let mut tables = AnalysisTables::default();
        if let Some(stop) = file.stop_words {
            if let Some(latin) = stop.latin {
                tables.stop_words.latin = latin.iter().map(|w| w.to_lowercase()).collect();
            }
            if let Some(other) = stop.other {
                tables.stop_words.other = other.iter().map(|w| w.to_lowercase()).collect();
            }
        }
        if !file.tags.is_empty() {
            tables.tag_rules = file
                .tags
                .into_iter()
                .map(|rule| TagRule {
                    label: rule.label,
                    keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect();
        }
        if let Some(clues) = file.action_clues {
            tables.action_clues = clues.iter().map(|c| c.to_lowercase()).collect();
        }
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// Loads the override file when one is configured, otherwise the built-in tables.
    pub fn load_optional(path: Option<&str>) -> Result<Self, CoreError> {
        match path {
            Some(p) => Self::load(Path::new(p)),
            None => Ok(Self::default()),
        }
    }
}
