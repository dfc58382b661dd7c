// File: src/core/tokenizer.rs
use crate::core::types::Token;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Built-in English stop words, loaded by `Bayes::load_default_stop_words`.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "among", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "ever", "every", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "let", "like", "many", "may", "me",
    "might", "more", "most", "much", "must", "my", "myself", "new", "no", "nor", "not", "now",
    "of", "off", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shall", "she", "should", "since", "so", "some", "still", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "though", "through", "to", "too", "two", "under", "until", "up",
    "upon", "us", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Lower-cased stop words in insertion order, with a set for lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopWords {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `word` lower-cased. Returns false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.to_lowercase();
        if self.lookup.contains(&word) {
            return false;
        }
        self.lookup.insert(word.clone());
        self.ordered.push(word);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words = StopWords::new();
        for word in iter {
            words.insert(word.as_ref());
        }
        words
    }
}

/// Splits raw text into normalized tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str, stop_words: &StopWords) -> Vec<Token>;
}

/// Named tokenizer variants, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    #[default]
    Simple,
    Stemming,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Simple => Box::new(SimpleTokenizer),
            TokenizerKind::Stemming => Box::new(StemmingTokenizer::new()),
        }
    }
}

/// Lower-cases words and strips non-word characters, keeping inner hyphens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    fn normalize_word(word: &str) -> String {
        let mut parts: Vec<&str> = word.split('-').collect();
        // "see-" and "--" split into trailing empty parts that never join back in.
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        parts
            .iter()
            .map(|part| {
                part.chars()
                    .flat_map(char::to_lowercase)
                    .filter(|c| c.is_alphanumeric() || *c == '_')
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str, stop_words: &StopWords) -> Vec<Token> {
        text.split_whitespace()
            .map(Self::normalize_word)
            .filter(|t| !t.is_empty() && t != "-" && !stop_words.contains(t))
            .collect()
    }
}

/// `SimpleTokenizer` followed by English (Porter2) stemming of each token.
pub struct StemmingTokenizer {
    stemmer: Stemmer,
}

impl StemmingTokenizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for StemmingTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for StemmingTokenizer {
    fn tokenize(&self, text: &str, stop_words: &StopWords) -> Vec<Token> {
        SimpleTokenizer
            .tokenize(text, stop_words)
            .into_iter()
            .map(|token| self.stemmer.stem(&token).into_owned())
            .collect()
    }
}
