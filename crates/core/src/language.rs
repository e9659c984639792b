//! Language identification over a bounded prefix of the document.

use tracing::debug;
use whatlang::Lang;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Returns a two-letter code where one exists, the ISO 639-3 code otherwise,
/// or `"unknown"` for empty input and undetectable text.
///
/// Only the first `sample_chars` characters are inspected.
pub fn detect_language(text: &str, sample_chars: usize) -> String {
    let sample: String = text.chars().take(sample_chars).collect();
    if sample.trim().is_empty() {
        return UNKNOWN_LANGUAGE.to_string();
    }
    match whatlang::detect_lang(&sample) {
        Some(lang) => iso_639_1(lang).unwrap_or_else(|| lang.code()).to_string(),
        None => {
            debug!("language detection gave no result");
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}

fn iso_639_1(lang: Lang) -> Option<&'static str> {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Hin => "hi",
        Lang::Mal => "ml",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Kan => "kn",
        Lang::Mar => "mr",
        Lang::Ben => "bn",
        Lang::Guj => "gu",
        Lang::Pan => "pa",
        Lang::Urd => "ur",
        Lang::Nep => "ne",
        Lang::Ori => "or",
        Lang::Sin => "si",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Ukr => "uk",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        Lang::Ara => "ar",
        Lang::Heb => "he",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Vie => "vi",
        Lang::Tha => "th",
        Lang::Ind => "id",
        _ => return None,
    };
    Some(code)
}
