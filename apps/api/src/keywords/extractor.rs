//! Keyword extractor: ranks the most frequent non-stopword tokens in page text.
//!
//! Deterministic: ties are broken by the order in which a token first appears
//! in the filtered sequence, so identical input always yields identical output.

use std::collections::HashMap;

use crate::keywords::normalizer::normalize;
use crate::keywords::stopwords::StopwordSet;

pub const DEFAULT_TOP_N: usize = 6;
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A distinct token and how many times it survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub word: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub top_n: usize,
    /// Minimum token length in characters.
    pub min_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

/// Counts every surviving token, highest frequency first, first-seen order on ties.
pub fn rank_keywords(text: &str, stopwords: &StopwordSet, min_length: usize) -> Vec<KeywordCount> {
    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in normalize(text) {
        if stopwords.contains(&token) || token.chars().count() < min_length {
            continue;
        }
        match index.get(&token) {
            Some(&i) => counts[i].frequency += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push(KeywordCount {
                    word: token,
                    frequency: 1,
                });
            }
        }
    }

    // sort_by is stable, so equal counts keep first-seen order
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts
}

/// Returns up to `options.top_n` keywords from `text`, most frequent first.
pub fn extract(text: &str, stopwords: &StopwordSet, options: ExtractOptions) -> Vec<String> {
    rank_keywords(text, stopwords, options.min_length)
        .into_iter()
        .take(options.top_n)
        .map(|kc| kc.word)
        .collect()
}
