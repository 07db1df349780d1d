//! Store module - best-score persistence for the engine
//!
//! The engine defines the [`BestScoreStore`](slabs_core::BestScoreStore)
//! contract; this crate provides the implementations a host wires in.
//!
//! # Layout
//!
//! - [`file`]: [`JsonFileStore`], one JSON object keyed `bestScore_<side>`
//! - [`writer`]: [`BackgroundStore`], fire-and-forget saves on a tokio runtime
//! - [`config`]: [`StoreConfig`], read from the environment
//!
//! # Environment Variables
//!
//! - `SLABS_DATA_DIR`: directory of the score file (default: ".")
//! - `SLABS_BEST_SCORE_FILE`: file name (default: "best_scores.json")
//! - `SLABS_STORE_DISABLED`: set to "1" or "true" to disable persistence
//!
//! # Failure Model
//!
//! Loads happen once per session; a failed load is logged by the session and
//! counts as "no prior best". Saves are queued and written in the background;
//! a failed write is logged at warn level and dropped.
//!
//! # Example
//!
//! ```no_run
//! use slabs_core::{Session, SimpleRng};
//! use slabs_core::types::{Direction, GameAction};
//! use slabs_store::BackgroundStore;
//!
//! let store = BackgroundStore::start_from_env().expect("persistence enabled");
//! let mut session = Session::new(SimpleRng::new(7), store);
//! session.dispatch(GameAction::ResumeGame);
//! session.dispatch(GameAction::Move(Direction::Left));
//!
//! let (_state, _rng, store) = session.into_parts();
//! store.shutdown();
//! ```

pub mod config;
pub mod file;
pub mod writer;

pub use slabs_core as core;
pub use slabs_types as types;

pub use config::StoreConfig;
pub use file::JsonFileStore;
pub use writer::{run_writer, BackgroundStore, SaveRequest};
