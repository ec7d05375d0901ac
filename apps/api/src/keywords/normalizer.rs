//! Text normalizer: lower-cases raw page text and splits it into word tokens.

use std::sync::OnceLock;

use regex::Regex;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // \w is Unicode-aware: letters, digits, and underscore from any script.
    RE.get_or_init(|| Regex::new(r"\w+").expect("word regex is valid"))
}

/// Splits `text` into lower-cased runs of word characters.
/// Empty or punctuation-only input yields an empty vector.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_re()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
