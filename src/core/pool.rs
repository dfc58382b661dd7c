// File: src/core/pool.rs
use crate::core::types::{Count, Token};
use std::collections::HashMap;
use std::fmt;

/// A named bag of token counts: the training data for one category.
///
/// `token_count` always equals the sum of `data`'s values, and a token is
/// only present in `data` while its count is at least 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    name: String,
    data: HashMap<Token, Count>,
    token_count: Count,
    /// Number of train calls minus untrain calls. Bookkeeping only.
    train_count: i64,
    /// Opaque uids passed with train calls.
    training: Vec<String>,
}

impl Pool {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Rebuilds a pool from persisted parts. `token_count` is recomputed from `data`.
    pub(crate) fn from_parts(
        name: &str,
        data: HashMap<Token, Count>,
        train_count: i64,
        training: Vec<String>,
    ) -> Self {
        let token_count = data.values().sum();
        Self {
            name: name.to_string(),
            data,
            token_count,
            train_count,
            training,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn token_count(&self) -> Count {
        self.token_count
    }

    pub fn train_count(&self) -> i64 {
        self.train_count
    }

    pub fn data(&self) -> &HashMap<Token, Count> {
        &self.data
    }

    pub fn training(&self) -> &[String] {
        &self.training
    }

    /// Count of `token`, or `None` if the pool has never seen it.
    pub fn get(&self, token: &str) -> Option<Count> {
        self.data.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.data.contains_key(token)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Adds `count` occurrences of `token`.
    pub fn add_token(&mut self, token: &str, count: Count) {
        if count == 0 {
            return;
        }
        *self.data.entry(token.to_string()).or_insert(0) += count;
        self.token_count += count;
    }

    /// Removes up to `count` occurrences of `token` and returns how many were
    /// actually removed. The entry is dropped once its count reaches zero;
    /// removing an absent token is a no-op.
    pub fn remove_token(&mut self, token: &str, count: Count) -> Count {
        let Some(current) = self.data.get_mut(token) else {
            return 0;
        };
        let removed = count.min(*current);
        *current -= removed;
        if *current == 0 {
            self.data.remove(token);
        }
        self.token_count -= removed;
        removed
    }

    /// Adds every count of `other` into this pool. Not idempotent.
    pub fn merge(&mut self, other: &Pool) {
        for (token, &count) in &other.data {
            self.add_token(token, count);
        }
    }

    pub(crate) fn record_train(&mut self, uid: Option<&str>) {
        self.train_count += 1;
        if let Some(uid) = uid {
            self.training.push(uid.to_string());
        }
    }

    pub(crate) fn record_untrain(&mut self, uid: Option<&str>) {
        self.train_count -= 1;
        if let Some(uid) = uid {
            self.training.retain(|u| u != uid);
        }
    }

    /// True if a train call tagged with `uid` has been recorded.
    pub fn trained_on(&self, uid: &str) -> bool {
        self.training.iter().any(|u| u == uid)
    }

    /// (token, count) pairs sorted by token.
    pub fn sorted_data(&self) -> Vec<(Token, Count)> {
        let mut pairs: Vec<(Token, Count)> =
            self.data.iter().map(|(t, &c)| (t.clone(), c)).collect();
        pairs.sort();
        pairs
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "noname"
        } else {
            &self.name
        };
        write!(f, "<BayesDict: {}, {} tokens>", name, self.token_count)
    }
}
