//! Stopword provider: the set of common words excluded from keyword ranking.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// English stopwords (NLTK corpus). Contractions are stored in their split
/// forms ("don", "shouldn") because tokens never contain apostrophes.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        ENGLISH.iter().copied().collect()
    }

    /// Reads one stopword per line. Blank lines and `#` comments are skipped;
    /// entries are trimmed and lower-cased.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut words = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line.context("Failed to read stopword line")?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open stopword file '{}'", path.display()))?;
        Self::from_reader(file)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_covers_common_words() {
        let set = StopwordSet::english();
        for word in ["the", "and", "your", "with", "don", "shouldn"] {
            assert!(set.contains(word), "missing {word}");
        }
        assert!(!set.contains("nutrition"));
    }

    #[test]
    fn test_from_reader_skips_comments_and_blanks() {
        let input = "# custom list\nFree\n\n  near  \nme\n";
        let set = StopwordSet::from_reader(input.as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("free"));
        assert!(set.contains("near"));
        assert!(!set.contains("# custom list"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "services\nhelp").unwrap();
        let set = StopwordSet::load(file.path()).unwrap();
        assert!(set.contains("services"));
        assert!(set.contains("help"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = StopwordSet::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("not/here.txt"));
    }

    #[test]
    fn test_empty_set() {
        assert!(StopwordSet::empty().is_empty());
    }
}
