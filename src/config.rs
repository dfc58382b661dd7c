//! Engine configuration.

use crate::core::combiner::CombinerKind;
use crate::core::tokenizer::TokenizerKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NEUTRAL_BAND: f64 = 0.1;
pub const DEFAULT_MIN_SCORE: f64 = 0.0001;
pub const DEFAULT_MAX_SCORE: f64 = 0.9999;

/// Thresholds applied when token scores are cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Scores within this distance of 0.5 are dropped as non-discriminative.
    pub neutral_band: f64,
    /// Lower clamp for cached scores.
    pub min_score: f64,
    /// Upper clamp for cached scores.
    pub max_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            neutral_band: DEFAULT_NEUTRAL_BAND,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

/// Construction-time settings for a `Bayes` engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesConfig {
    pub tokenizer: TokenizerKind,
    pub combiner: CombinerKind,
    /// Extra stop words added at construction.
    pub stop_words: Vec<String>,
    /// Load the built-in English stop-word list.
    pub default_stop_words: bool,
    pub scoring: ScoringConfig,
}

impl BayesConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
