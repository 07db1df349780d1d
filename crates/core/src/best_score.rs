//! Best scores per board side and the persistence contract
//!
//! The engine only tracks best scores in memory. Storing them is the job of a
//! [`BestScoreStore`], injected by the host. Keys follow `bestScore_<side>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::types::{is_supported_side, BOARD_SIDE_COUNT, MIN_BOARD_SIDE};

/// Errors reported by best-score stores
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("unsupported board side {0}")]
    UnsupportedSide(usize),
    #[error("best-score store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Load/save contract for best scores, keyed by board side
pub trait BestScoreStore {
    /// Read the best score for `side`; `Ok(None)` when nothing was stored yet
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError>;

    /// Record `score` as the best for `side`
    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for &S {
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        (**self).load_best_score(side)
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        (**self).save_best_score(side, score)
    }
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        (**self).load_best_score(side)
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        (**self).save_best_score(side, score)
    }
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Arc<S> {
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        (**self).load_best_score(side)
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        (**self).save_best_score(side, score)
    }
}

/// In-process store, for tests and hosts without persistent storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: Mutex<HashMap<usize, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a best score
    pub fn with_score(self, side: usize, score: u64) -> Self {
        if let Ok(mut scores) = self.scores.lock() {
            scores.insert(side, score);
        }
        self
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        if !is_supported_side(side) {
            return Err(StoreError::UnsupportedSide(side));
        }
        let scores = self
            .scores
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(scores.get(&side).copied())
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        if !is_supported_side(side) {
            return Err(StoreError::UnsupportedSide(side));
        }
        let mut scores = self
            .scores
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        scores.insert(side, score);
        Ok(())
    }
}

/// A best score that was just beaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBest {
    pub side: usize,
    pub score: u64,
}

/// Best score per board side; entries appear the first time a side scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScores {
    by_side: [Option<u64>; BOARD_SIDE_COUNT],
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(side: usize) -> Option<usize> {
        if is_supported_side(side) {
            Some(side - MIN_BOARD_SIDE)
        } else {
            None
        }
    }

    /// Best score for `side`, 0 when none was recorded
    pub fn get(&self, side: usize) -> u64 {
        self.entry(side).unwrap_or(0)
    }

    /// Recorded entry for `side`, if any
    pub fn entry(&self, side: usize) -> Option<u64> {
        Self::slot(side).and_then(|i| self.by_side[i])
    }

    /// Record `score` if it beats the current best for `side`.
    ///
    /// Returns true when the entry changed.
    pub fn record(&mut self, side: usize, score: u64) -> bool {
        let Some(i) = Self::slot(side) else {
            return false;
        };
        if score > self.by_side[i].unwrap_or(0) {
            self.by_side[i] = Some(score);
            true
        } else {
            false
        }
    }

    /// Recorded entries as (side, score), smallest side first
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.by_side
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|score| (i + MIN_BOARD_SIDE, score)))
    }

    /// Read every side from `store`.
    ///
    /// Failures are logged and treated as "no prior best".
    pub fn load_from<S: BestScoreStore + ?Sized>(store: &S) -> Self {
        let mut scores = Self::new();
        for (i, slot) in scores.by_side.iter_mut().enumerate() {
            let side = i + MIN_BOARD_SIDE;
            match store.load_best_score(side) {
                Ok(found) => *slot = found,
                Err(e) => log::warn!("could not load best score for side {}: {}", side, e),
            }
        }
        scores
    }
}
