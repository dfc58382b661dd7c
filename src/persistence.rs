// File: src/persistence.rs
use crate::core::engine::Bayes;
use crate::core::pool::Pool;
use crate::core::types::{Count, Token};
use crate::error::{BayesError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// The persisted state of an engine. The corpus and score cache are never
/// stored; they are rebuilt from the pools after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stop_words: Vec<String>,
    pub pools: BTreeMap<String, PoolSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub train_count: i64,
    pub token_count: Count,
    pub data: BTreeMap<Token, Count>,
    /// Uids recorded by `train_with_uid`.
    #[serde(default)]
    pub training: Vec<String>,
}

impl PoolSnapshot {
    fn from_pool(pool: &Pool) -> Self {
        Self {
            train_count: pool.train_count(),
            token_count: pool.token_count(),
            data: pool.data().iter().map(|(t, &c)| (t.clone(), c)).collect(),
            training: pool.training().to_vec(),
        }
    }

    fn into_pool(self, name: &str) -> Result<Pool> {
        if name.is_empty() {
            return Err(BayesError::invalid("snapshot holds a pool with an empty name"));
        }
        if let Some((token, _)) = self.data.iter().find(|(_, count)| **count == 0) {
            return Err(BayesError::invalid(format!(
                "pool {name}: token {token:?} has a zero count"
            )));
        }
        let sum: Count = self.data.values().sum();
        if sum != self.token_count {
            return Err(BayesError::invalid(format!(
                "pool {name}: token_count {} does not match data total {sum}",
                self.token_count
            )));
        }
        let data: HashMap<Token, Count> = self.data.into_iter().collect();
        Ok(Pool::from_parts(name, data, self.train_count, self.training))
    }
}

impl Bayes {
    pub fn export(&self) -> Snapshot {
        Snapshot {
            stop_words: self.stop_words().to_vec(),
            pools: self
                .pools
                .iter()
                .map(|(name, pool)| (name.clone(), PoolSnapshot::from_pool(pool)))
                .collect(),
        }
    }

    /// Replaces pools and stop words with the snapshot's. The tokenizer,
    /// combiner and scoring settings of this engine are kept.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        let mut pools = BTreeMap::new();
        for (name, pool) in snapshot.pools {
            let pool = pool.into_pool(&name)?;
            pools.insert(name, pool);
        }
        self.pools = pools;
        self.stop_words = snapshot.stop_words.iter().collect();
        self.mark_dirty();
        Ok(())
    }

    /// A default engine holding the snapshot's state.
    pub fn import(snapshot: Snapshot) -> Result<Bayes> {
        let mut engine = Bayes::new();
        engine.restore(snapshot)?;
        Ok(engine)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    pub fn from_json(json: &str) -> Result<Bayes> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Bayes::import(snapshot)
    }
}

enum Format {
    Binary,
    Json,
}

impl Format {
    /// `.bin` files hold bincode; anything else is JSON.
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => Format::Binary,
            _ => Format::Json,
        }
    }
}

/// Writes the snapshot through a temp file in the target directory, so a
/// crash never leaves a half-written file at `path`.
pub fn save_to_disk(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    match Format::for_path(path) {
        Format::Binary => bincode::serialize_into(&mut writer, snapshot)?,
        Format::Json => serde_json::to_writer_pretty(&mut writer, snapshot)?,
    }
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), pools = snapshot.pools.len(), "snapshot saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = match Format::for_path(path) {
        Format::Binary => bincode::deserialize_from(reader)?,
        Format::Json => serde_json::from_reader(reader)?,
    };
    info!(path = %path.display(), pools = snapshot.pools.len(), "snapshot loaded");
    Ok(snapshot)
}
