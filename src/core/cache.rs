// File: src/core/cache.rs
//! Corpus aggregation and per-pool token scoring.
//!
//! Both are pure functions of the current pools; the engine decides when they
//! need to run again.

use crate::config::ScoringConfig;
use crate::core::pool::Pool;
use crate::core::types::{Cache, Count, Score, ScoreTable, CORPUS_NAME};
use std::collections::BTreeMap;
use tracing::debug;

/// Element-wise sum of every pool. Rebuilt from scratch on each call.
pub fn build_corpus(pools: &BTreeMap<String, Pool>) -> Pool {
    let mut corpus = Pool::new(CORPUS_NAME);
    for pool in pools.values() {
        corpus.merge(pool);
    }
    corpus
}

/// Scores how strongly a token belongs to one pool.
///
/// `this_count` is the token's count in the pool, `other_count` its count in
/// every other pool, `pool_total` the pool's token total and `them_count` the
/// floored token total of every other pool. Returns `None` when the token is
/// absent from the pool or lands in the neutral band.
pub fn score_token(
    this_count: Count,
    other_count: Count,
    pool_total: Count,
    them_count: Count,
    scoring: &ScoringConfig,
) -> Option<Score> {
    if this_count == 0 || pool_total == 0 {
        return None;
    }
    let good_metric = (other_count as f64 / pool_total as f64).min(1.0);
    let bad_metric = (this_count as f64 / them_count.max(1) as f64).min(1.0);
    let f = bad_metric / (good_metric + bad_metric);

    if (f - 0.5).abs() < scoring.neutral_band {
        return None;
    }
    Some(f.clamp(scoring.min_score, scoring.max_score))
}

/// Scores every corpus token against every non-empty pool.
pub fn build_cache(
    pools: &BTreeMap<String, Pool>,
    corpus: &Pool,
    scoring: &ScoringConfig,
) -> Cache {
    let mut cache = Cache::new();
    if corpus.token_count() == 0 {
        return cache;
    }

    for (name, pool) in pools {
        let pool_total = pool.token_count();
        if pool_total == 0 {
            continue;
        }
        let them_count = corpus.token_count().saturating_sub(pool_total).max(1);

        let mut table = ScoreTable::new();
        for (token, &total) in corpus.data() {
            let Some(this_count) = pool.get(token) else {
                continue;
            };
            let other_count = total.saturating_sub(this_count);
            if let Some(score) = score_token(this_count, other_count, pool_total, them_count, scoring)
            {
                table.insert(token.clone(), score);
            }
        }
        debug!(pool = %name, scored = table.len(), "pool scores built");
        cache.insert(name.clone(), table);
    }
    cache
}
