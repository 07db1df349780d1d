//! JSON file store
//!
//! All sides share one file holding a flat JSON object:
//!
//! ```text
//! {"bestScore_4":2312,"bestScore_5":940}
//! ```
//!
//! Saves rewrite the whole object through a temp file and a rename, so a
//! crash mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use crate::core::{BestScoreStore, StoreError};
use crate::types::{best_score_key, is_supported_side};

type ScoreMap = BTreeMap<String, u64>;

/// Best scores persisted as one JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<ScoreMap> {
        let text = match fs::read_to_string(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScoreMap::new()),
            other => other.with_context(|| format!("reading {}", self.path.display()))?,
        };
        if text.trim().is_empty() {
            return Ok(ScoreMap::new());
        }
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }

    fn write_map(&self, map: &ScoreMap) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        let json = serde_json::to_string(map).context("encoding best scores")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self, side: usize) -> Result<Option<u64>> {
        Ok(self.read_map()?.get(&best_score_key(side)).copied())
    }

    fn save(&self, side: usize, score: u64) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("best-score file lock poisoned"))?;
        let mut map = self.read_map()?;
        map.insert(best_score_key(side), score);
        self.write_map(&map)
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        if !is_supported_side(side) {
            return Err(StoreError::UnsupportedSide(side));
        }
        Ok(self.load(side)?)
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        if !is_supported_side(side) {
            return Err(StoreError::UnsupportedSide(side));
        }
        Ok(self.save(side, score)?)
    }
}
