use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect();
}

/// Turns article bodies into term lists for the TF-IDF model.
///
/// Words come from Unicode word segmentation, are lowercased and lose
/// English stop words. Snowball stemming is optional.
#[derive(Default)]
pub struct Tokenizer {
    stemmer: Option<Stemmer>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stemming(mut self, enabled: bool) -> Self {
        self.stemmer = enabled.then(|| Stemmer::create(Algorithm::English));
        self
    }

    pub fn is_stop_word(word: &str) -> bool {
        STOP_WORDS.contains(word)
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .filter(|word| !Self::is_stop_word(word))
            .map(|word| match &self.stemmer {
                Some(stemmer) => stemmer.stem(&word).into_owned(),
                None => word,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("The Protest at the PLANT, in Abila!"),
            vec!["protest", "plant", "abila"]
        );
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Over 20 people; 2014 report"),
            vec!["20", "people", "2014", "report"]
        );
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("... -- !!").is_empty());
    }

    #[test]
    fn test_stemming() {
        let plain = Tokenizer::new();
        let stemmed = Tokenizer::new().with_stemming(true);
        assert_eq!(plain.tokenize("protests"), vec!["protests"]);
        assert_eq!(stemmed.tokenize("protests"), vec!["protest"]);
        assert_eq!(stemmed.tokenize("protesting"), stemmed.tokenize("protested"));
    }
}
