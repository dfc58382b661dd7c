use crate::config::{BayesConfig, ScoringConfig};
use crate::core::cache::{build_cache, build_corpus};
use crate::core::combiner::{Combiner, Robinson};
use crate::core::pool::Pool;
use crate::core::tokenizer::{SimpleTokenizer, StopWords, Tokenizer, DEFAULT_STOP_WORDS};
use crate::core::types::{Cache, Count, Score, TextInput, Token, CORPUS_NAME};
use crate::error::{BayesError, Result};
use crate::learning::{LearningEngine, TrainingExample};
use crate::persistence::{load_from_disk, save_to_disk};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The classifier: named pools, plus a corpus and score cache derived from them.
///
/// Every mutation marks the engine dirty; the corpus and cache are rebuilt
/// together on the next guess or explicit query. An engine is not meant to be
/// shared between threads without an external lock around its `&mut self` calls.
pub struct Bayes {
    pub(crate) pools: BTreeMap<String, Pool>,
    pub(crate) stop_words: StopWords,
    tokenizer: Box<dyn Tokenizer>,
    combiner: Box<dyn Combiner>,
    scoring: ScoringConfig,
    learning_engine: LearningEngine,
    corpus: Pool,
    cache: Cache,
    dirty: bool,
    snapshot_path: Option<PathBuf>,
}

impl Bayes {
    pub fn new() -> Self {
        Self::with_strategies(Box::new(SimpleTokenizer), Box::new(Robinson))
    }

    pub fn with_strategies(tokenizer: Box<dyn Tokenizer>, combiner: Box<dyn Combiner>) -> Self {
        Self {
            pools: BTreeMap::new(),
            stop_words: StopWords::new(),
            tokenizer,
            combiner,
            scoring: ScoringConfig::default(),
            learning_engine: LearningEngine::new(),
            corpus: Pool::new(CORPUS_NAME),
            cache: Cache::new(),
            dirty: true,
            snapshot_path: None,
        }
    }

    pub fn with_config(config: &BayesConfig) -> Self {
        let mut engine = Self::with_strategies(config.tokenizer.build(), config.combiner.build());
        engine.scoring = config.scoring;
        if config.default_stop_words {
            engine.load_default_stop_words();
        }
        engine.add_stop_words(&config.stop_words);
        engine
    }

    /// Loads the snapshot at `path`, or starts empty if there is none.
    /// Either way, `commit` writes back to `path`.
    pub fn load_or_new(path: &Path, config: &BayesConfig) -> Result<Self> {
        let mut engine = Self::with_config(config);
        if path.exists() {
            let snapshot = load_from_disk(path)?;
            engine.restore(snapshot)?;
        } else {
            debug!(path = %path.display(), "no snapshot on disk, starting empty");
        }
        engine.snapshot_path = Some(path.to_path_buf());
        Ok(engine)
    }

    /// Saves to the path given to `load_or_new`. Does nothing if there is none.
    pub fn commit(&self) -> Result<()> {
        match &self.snapshot_path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_to_disk(&self.export(), path)
    }

    /// Replaces pools and stop words with the snapshot at `path`.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let snapshot = load_from_disk(path)?;
        self.restore(snapshot)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_combiner(&mut self, combiner: Box<dyn Combiner>) {
        self.combiner = combiner;
    }

    // --- Stop words ---

    pub fn add_stop_word(&mut self, word: &str) {
        self.stop_words.insert(word);
    }

    pub fn add_stop_words<S: AsRef<str>>(&mut self, words: impl IntoIterator<Item = S>) {
        for word in words {
            self.stop_words.insert(word.as_ref());
        }
    }

    pub fn load_default_stop_words(&mut self) {
        self.add_stop_words(DEFAULT_STOP_WORDS.iter().copied());
    }

    /// Adds the stop words held in a JSON array file.
    pub fn load_stop_words(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let words: Vec<String> = serde_json::from_str(&text)?;
        info!(path = %path.display(), count = words.len(), "loaded stop words");
        self.add_stop_words(&words);
        Ok(())
    }

    pub fn stop_words(&self) -> &[String] {
        self.stop_words.as_slice()
    }

    // --- Pool management ---

    /// Returns the named pool, creating it empty if needed.
    pub fn new_pool(&mut self, name: &str) -> Result<&mut Pool> {
        validate_name(name)?;
        self.mark_dirty();
        Ok(self
            .pools
            .entry(name.to_string())
            .or_insert_with(|| Pool::new(name)))
    }

    pub fn remove_pool(&mut self, name: &str) -> Option<Pool> {
        self.mark_dirty();
        let removed = self.pools.remove(name);
        if removed.is_none() {
            debug!(pool = %name, "remove of absent pool ignored");
        }
        removed
    }

    /// Moves the pool at `old` to `new`, replacing any pool already there.
    pub fn rename_pool(&mut self, old: &str, new: &str) -> Result<()> {
        self.mark_dirty();
        validate_name(new)?;
        let mut pool = self
            .pools
            .remove(old)
            .ok_or_else(|| BayesError::pool_not_found(old))?;
        pool.set_name(new);
        if self.pools.insert(new.to_string(), pool).is_some() {
            info!(from = %old, to = %new, "rename replaced an existing pool");
        }
        Ok(())
    }

    /// Adds the counts of `source` into `dest`. `source` is left unchanged.
    pub fn merge_pools(&mut self, dest: &str, source: &str) -> Result<()> {
        self.mark_dirty();
        let source_pool = self
            .pools
            .get(source)
            .cloned()
            .ok_or_else(|| BayesError::pool_not_found(source))?;
        let dest_pool = self
            .pools
            .get_mut(dest)
            .ok_or_else(|| BayesError::pool_not_found(dest))?;
        dest_pool.merge(&source_pool);
        info!(dest = %dest, source = %source, tokens = source_pool.token_count(), "merged pools");
        Ok(())
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(name)
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    /// Pool names in ascending order. The corpus is never listed.
    pub fn pool_names(&self) -> Vec<String> {
        self.pools.keys().cloned().collect()
    }

    /// (token, count) pairs of the named pool, sorted by token.
    pub fn pool_data(&self, name: &str) -> Result<Vec<(Token, Count)>> {
        self.pool(name)
            .map(Pool::sorted_data)
            .ok_or_else(|| BayesError::pool_not_found(name))
    }

    /// Tokens of the named pool, sorted.
    pub fn pool_tokens(&self, name: &str) -> Result<Vec<Token>> {
        Ok(self
            .pool_data(name)?
            .into_iter()
            .map(|(token, _)| token)
            .collect())
    }

    // --- Training ---

    /// Tokenizes text with the engine's stop words; token input passes through.
    pub fn tokens<'a>(&self, input: impl Into<TextInput<'a>>) -> Vec<Token> {
        match input.into() {
            TextInput::Text(text) => self.tokenizer.tokenize(text, &self.stop_words),
            TextInput::Tokens(tokens) => tokens.to_vec(),
        }
    }

    pub fn train<'a>(&mut self, pool_name: &str, input: impl Into<TextInput<'a>>) -> Result<()> {
        self.train_example(pool_name, input.into(), None)
    }

    pub fn train_with_uid<'a>(
        &mut self,
        pool_name: &str,
        input: impl Into<TextInput<'a>>,
        uid: &str,
    ) -> Result<()> {
        self.train_example(pool_name, input.into(), Some(uid))
    }

    fn train_example(
        &mut self,
        pool_name: &str,
        input: TextInput<'_>,
        uid: Option<&str>,
    ) -> Result<()> {
        validate_name(pool_name)?;
        self.mark_dirty();
        let tokens = self.tokens(input);
        let pool = self
            .pools
            .entry(pool_name.to_string())
            .or_insert_with(|| Pool::new(pool_name));
        self.learning_engine
            .learn(pool, &TrainingExample { tokens: &tokens, uid });
        debug!(pool = %pool_name, tokens = tokens.len(), "trained");
        Ok(())
    }

    /// Removes a training example. A missing pool is left missing.
    pub fn untrain<'a>(&mut self, pool_name: &str, input: impl Into<TextInput<'a>>) -> Result<()> {
        self.untrain_example(pool_name, input.into(), None)
    }

    pub fn untrain_with_uid<'a>(
        &mut self,
        pool_name: &str,
        input: impl Into<TextInput<'a>>,
        uid: &str,
    ) -> Result<()> {
        self.untrain_example(pool_name, input.into(), Some(uid))
    }

    fn untrain_example(
        &mut self,
        pool_name: &str,
        input: TextInput<'_>,
        uid: Option<&str>,
    ) -> Result<()> {
        self.mark_dirty();
        let tokens = self.tokens(input);
        let Some(pool) = self.pools.get_mut(pool_name) else {
            debug!(pool = %pool_name, "untrain of absent pool ignored");
            return Ok(());
        };
        let removed = self
            .learning_engine
            .unlearn(pool, &TrainingExample { tokens: &tokens, uid });
        debug!(pool = %pool_name, tokens = tokens.len(), removed, "untrained");
        Ok(())
    }

    /// True if any pool recorded a train call tagged with `uid`.
    pub fn trained_on(&self, uid: &str) -> bool {
        self.pools.values().any(|pool| pool.trained_on(uid))
    }

    // --- Derived state ---

    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.corpus = build_corpus(&self.pools);
        self.cache = build_cache(&self.pools, &self.corpus, &self.scoring);
        self.dirty = false;
        debug!(
            pools = self.pools.len(),
            corpus_tokens = self.corpus.token_count(),
            distinct = self.corpus.len(),
            "rebuilt corpus and score cache"
        );
    }

    /// The aggregate of all pools, rebuilt first if stale.
    pub fn corpus(&mut self) -> &Pool {
        self.refresh();
        &self.corpus
    }

    /// Cached token scores per pool, rebuilt first if stale.
    pub fn pool_probs(&mut self) -> &Cache {
        self.refresh();
        &self.cache
    }

    /// Probability per pool that the message belongs to it, for every pool
    /// where at least one message token has a cached score.
    pub fn guess<'a>(&mut self, message: impl Into<TextInput<'a>>) -> BTreeMap<String, f64> {
        let mut tokens = self.tokens(message);
        tokens.sort();
        self.refresh();

        let mut result = BTreeMap::new();
        for (pool_name, table) in &self.cache {
            let probs: Vec<(&str, Score)> = tokens
                .iter()
                .filter_map(|token| table.get(token).map(|&score| (token.as_str(), score)))
                .collect();
            if probs.is_empty() {
                continue;
            }
            result.insert(pool_name.clone(), self.combiner.combine(&probs, pool_name));
        }
        result
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BayesError::invalid("pool name must not be empty"));
    }
    Ok(())
}

impl Default for Bayes {
    fn default() -> Self {
        Self::new()
    }
}
