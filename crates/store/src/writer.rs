//! Background writer runtime.
//!
//! Bridges the synchronous game loop with asynchronous persistence: saves are
//! queued on a channel and written by a task on a private tokio runtime, so
//! recording a best score never blocks a move.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::StoreConfig;
use crate::core::{BestScoreStore, StoreError};
use crate::file::JsonFileStore;

/// Pending write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRequest {
    pub side: usize,
    pub score: u64,
}

/// Drain `rx`, writing each request to `store` on the blocking pool.
///
/// Failed writes are logged and skipped. Returns the number of successful
/// writes once every sender is dropped.
pub async fn run_writer<S>(store: Arc<S>, mut rx: mpsc::UnboundedReceiver<SaveRequest>) -> usize
where
    S: BestScoreStore + Send + Sync + 'static,
{
    log::debug!("best-score writer started");
    let mut written = 0usize;
    while let Some(req) = rx.recv().await {
        let target = Arc::clone(&store);
        let result =
            tokio::task::spawn_blocking(move || target.save_best_score(req.side, req.score)).await;
        match result {
            Ok(Ok(())) => written += 1,
            Ok(Err(e)) => log::warn!("failed to save best score for side {}: {}", req.side, e),
            Err(e) => log::warn!("best-score write task failed: {}", e),
        }
    }
    log::debug!("best-score writer stopped after {} writes", written);
    written
}

/// Store wrapper whose saves are fire-and-forget.
///
/// Loads go straight to the inner store (they only happen at startup).
pub struct BackgroundStore<S> {
    inner: Arc<S>,
    rt: Option<Runtime>,
    tx: Option<mpsc::UnboundedSender<SaveRequest>>,
    handle: Option<JoinHandle<usize>>,
}

impl<S> BackgroundStore<S>
where
    S: BestScoreStore + Send + Sync + 'static,
{
    /// Spawn the writer for `inner`.
    pub fn start(inner: S) -> Result<Self> {
        let rt = Runtime::new().context("creating best-score writer runtime")?;
        let inner = Arc::new(inner);
        let (tx, rx) = mpsc::unbounded_channel::<SaveRequest>();
        let handle = rt.spawn(run_writer(Arc::clone(&inner), rx));

        Ok(Self {
            inner,
            rt: Some(rt),
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Stop accepting saves, wait for queued writes, and return how many
    /// succeeded.
    ///
    /// Safe to call from async code: the drain then runs on a helper thread.
    pub fn shutdown(mut self) -> usize {
        self.finish()
    }
}

impl<S> BackgroundStore<S> {
    fn finish(&mut self) -> usize {
        // Closing the channel ends the writer loop.
        self.tx.take();
        let (Some(rt), Some(handle)) = (self.rt.take(), self.handle.take()) else {
            return 0;
        };
        let drain = move || match rt.block_on(handle) {
            Ok(written) => written,
            Err(e) => {
                log::warn!("best-score writer did not finish cleanly: {}", e);
                0
            }
        };

        // A runtime cannot be blocked on (or dropped) from a runtime thread.
        if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::spawn(drain).join().unwrap_or_else(|_| {
                log::warn!("best-score writer drain thread panicked");
                0
            })
        } else {
            drain()
        }
    }
}

impl BackgroundStore<JsonFileStore> {
    /// Start a file-backed writer from environment variables.
    ///
    /// Returns None if `SLABS_STORE_DISABLED` is set or the runtime cannot
    /// be created.
    pub fn start_from_env() -> Option<Self> {
        Self::start_with_config(&StoreConfig::from_env())
    }

    pub fn start_with_config(config: &StoreConfig) -> Option<Self> {
        if config.disabled {
            log::debug!("best-score persistence disabled");
            return None;
        }
        match Self::start(JsonFileStore::new(config.path())) {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("best-score persistence unavailable: {:#}", e);
                None
            }
        }
    }
}

impl<S> BestScoreStore for BackgroundStore<S>
where
    S: BestScoreStore + Send + Sync + 'static,
{
    fn load_best_score(&self, side: usize) -> Result<Option<u64>, StoreError> {
        self.inner.load_best_score(side)
    }

    fn save_best_score(&self, side: usize, score: u64) -> Result<(), StoreError> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("writer shut down".to_string()))?;
        tx.send(SaveRequest { side, score })
            .map_err(|_| StoreError::Unavailable("writer stopped".to_string()))
    }
}

impl<S> Drop for BackgroundStore<S> {
    fn drop(&mut self) {
        self.finish();
    }
}
