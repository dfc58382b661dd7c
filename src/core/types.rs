// src/core/types.rs
use std::collections::BTreeMap;

/// A normalized unit of text, the key of every count and score table.
pub type Token = String;

/// Occurrence count of a token inside a pool.
pub type Count = u64;

/// Degree of belonging of a token to a pool, always inside the clamp bounds.
pub type Score = f64;

/// Name reserved for the derived aggregate of all pools.
pub const CORPUS_NAME: &str = "__Corpus__";

/// Per-pool token scores. Only tokens the scorer had an opinion on are present.
pub type ScoreTable = BTreeMap<Token, Score>;

/// Pool name -> score table. Sorted by pool name so iteration is deterministic.
pub type Cache = BTreeMap<String, ScoreTable>;

/// Input accepted by train, untrain and guess: raw text to tokenize, or tokens used verbatim.
#[derive(Debug, Clone, Copy)]
pub enum TextInput<'a> {
    Text(&'a str),
    Tokens(&'a [Token]),
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        TextInput::Text(text)
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(text: &'a String) -> Self {
        TextInput::Text(text.as_str())
    }
}

impl<'a> From<&'a [Token]> for TextInput<'a> {
    fn from(tokens: &'a [Token]) -> Self {
        TextInput::Tokens(tokens)
    }
}

impl<'a> From<&'a Vec<Token>> for TextInput<'a> {
    fn from(tokens: &'a Vec<Token>) -> Self {
        TextInput::Tokens(tokens.as_slice())
    }
}
