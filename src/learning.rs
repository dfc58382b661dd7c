// File: src/learning.rs
use crate::core::pool::Pool;
use crate::core::types::{Count, Token};

/// Applies one training example to a pool.
pub struct LearningEngine {
    token_increment: Count,
}

/// A tokenized training example, optionally tagged with a caller uid.
pub struct TrainingExample<'a> {
    pub tokens: &'a [Token],
    pub uid: Option<&'a str>,
}

impl LearningEngine {
    pub fn new() -> Self {
        Self { token_increment: 1 }
    }

    /// Counts every token of the example into `pool`.
    pub fn learn(&self, pool: &mut Pool, example: &TrainingExample<'_>) {
        for token in example.tokens {
            pool.add_token(token, self.token_increment);
        }
        pool.record_train(example.uid);
    }

    /// Reverses `learn`. Tokens the pool does not hold are skipped.
    /// Returns the number of occurrences actually removed.
    pub fn unlearn(&self, pool: &mut Pool, example: &TrainingExample<'_>) -> Count {
        let mut removed = 0;
        for token in example.tokens {
            removed += pool.remove_token(token, self.token_increment);
        }
        pool.record_untrain(example.uid);
        removed
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}
