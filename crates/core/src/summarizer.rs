//! Frequency-based extractive summarization.

use crate::segment::{split_sentences, tokenize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
pub struct SummaryParams {
    pub max_sentences: usize,
    pub score_exponent: f64,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            max_sentences: 5,
            score_exponent: 0.6,
        }
    }
}

#[derive(Debug)]
struct ScoredSentence {
    index: usize,
    score: f64,
}

/// Picks at most `params.max_sentences` sentences and returns them in reading order.
///
/// Documents that already fit are returned whole.
pub fn summarize(text: &str, params: SummaryParams, stop_words: &HashSet<String>) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.len() <= params.max_sentences {
        return sentences;
    }

    let tokenized: Vec<Vec<String>> = sentences
        .iter()
        .map(|s| {
            tokenize(s)
                .into_iter()
                .filter(|t| !stop_words.contains(t))
                .collect()
        })
        .collect();

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        for tok in tokens {
            *freq.entry(tok.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<ScoredSentence> = tokenized
        .iter()
        .enumerate()
        .map(|(index, tokens)| ScoredSentence {
            index,
            score: score_sentence(tokens, &freq, params.score_exponent),
        })
        .collect();
    ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.index.cmp(&b.index),
        other => other,
    });
    ranked.truncate(params.max_sentences);
    ranked.sort_by_key(|s| s.index);

    ranked
        .into_iter()
        .map(|s| sentences[s.index].clone())
        .collect()
}

fn score_sentence(tokens: &[String], freq: &HashMap<&str, usize>, exponent: f64) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total: usize = tokens
        .iter()
        .map(|t| freq.get(t.as_str()).copied().unwrap_or(0))
        .sum();
    total as f64 / (tokens.len() as f64).powf(exponent)
}
