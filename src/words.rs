//! Word-frequency analysis over venue names.
//!
//! Names are lowercased, stripped of everything but letters, and split on
//! whitespace; short words and common Spanish filler words are discarded
//! before counting.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::record::VenueRecord;

/// Filler words excluded from the frequency count.
const STOPWORDS: &[&str] = &[
    "del", "de", "la", "los", "las", "en", "el", "y", "san", "santa", "ruta", "turismo",
];

const MIN_WORD_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counts qualifying words across all record names, most frequent first,
/// ties broken alphabetically. `top` of 0 means unlimited.
pub fn word_frequencies(records: &[&VenueRecord], top: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        for word in qualifying_words(&record.name) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)))
        .collect();
    if top > 0 && ranked.len() > top {
        ranked.truncate(top);
    }
    ranked
}

fn qualifying_words(name: &str) -> Vec<String> {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .filter(|w| !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}
